use std::io::{self, BufRead, Write};

/// Ask for an image path on `output` and read one line from `input`.
pub fn read_image_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    writeln!(output, "Enter image file path>")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(clean_path(&line).to_string())
}

/// Strip whitespace and one pair of surrounding quotes, as left behind by
/// drag-and-drop or "copy as path".
pub fn clean_path(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed.trim_matches(|c| c == '"' || c == '\'')
}

/// Block until the user presses ENTER.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output, "Press ENTER to quit.")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

//! SimplePlanes sub-assembly document around a label's markup.

use crate::Result;
use std::fmt::Write;

/// The label is sized at one length unit per 20 pixels.
const PIXELS_PER_UNIT: f32 = 20.0;

/// Build the `DesignerParts` document for one label part.
///
/// `markup` must already be XML-escaped (as produced by [`crate::encode`]) and
/// is inserted verbatim. `name` is escaped here.
pub fn assemble(name: &str, markup: &str, width: u32, height: u32) -> Result<String> {
    let mut out = String::with_capacity(markup.len() + 1024);

    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, "<DesignerParts>")?;
    writeln!(
        out,
        r#"  <DesignerPart name="{}" category="Sub Assemblies" icon="GroupIconSubAssembly" description="">"#,
        escape_attribute(name)
    )?;
    writeln!(out, "    <Assembly>")?;
    writeln!(out, "      <Parts>")?;
    writeln!(
        out,
        r#"        <Part id="2" partType="Label-1" position="0,0,0" rotation="270,0,0" drag="0,0,0,0,0,0" materials="0,1,2" scale="1,1,1" partCollisionResponse="Default" calculateDrag="false">"#
    )?;
    writeln!(
        out,
        r#"           <Label.State designText="{markup}" fontName="Default" fontSize="1" horizontalAlignment="Center" verticalAlignment="Middle" width="{}" height="{}" outlineWidth="0" emission="0" offset="0,0.006,0" rotation="90,0,0" gradient="None" curvature="0" />"#,
        width as f32 / PIXELS_PER_UNIT,
        height as f32 / PIXELS_PER_UNIT,
    )?;
    writeln!(out, "        </Part>")?;
    writeln!(out, "      </Parts>")?;
    writeln!(out, "      <Connections/>")?;
    writeln!(out, "    </Assembly>")?;
    writeln!(out, "  </DesignerPart>")?;
    write!(out, "</DesignerParts>")?;

    Ok(out)
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ir::Redirect;
use std::fs;
use std::path::Path;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the rewrite-map document for `redirects`.
///
/// Keys keep their case; values are lowercased when
/// `config.lowercase_values` is set.
pub fn render_xml(map_name: &str, redirects: &[Redirect], config: &Config) -> String {
    let pad = " ".repeat(config.indent);
    let mut lines: Vec<String> = Vec::with_capacity(redirects.len() + 5);

    if config.xml_declaration {
        lines.push(XML_DECLARATION.to_string());
    }
    lines.push("<rewriteMaps>".to_string());

    let name = escape_attr(map_name);
    if redirects.is_empty() {
        lines.push(format!(r#"{}<rewriteMap name="{}" />"#, pad, name));
    } else {
        lines.push(format!(r#"{}<rewriteMap name="{}">"#, pad, name));
        for redirect in redirects {
            let value = if config.lowercase_values {
                redirect.to.to_lowercase()
            } else {
                redirect.to.clone()
            };
            lines.push(format!(
                r#"{}{}<add key="{}" value="{}" />"#,
                pad,
                pad,
                escape_attr(&redirect.from),
                escape_attr(&value)
            ));
        }
        lines.push(format!("{}</rewriteMap>", pad));
    }
    lines.push("</rewriteMaps>".to_string());

    let mut result = lines.join("\n");
    result.push('\n');
    result
}

/// Writes a rendered document, replacing any existing file.
pub fn write_xml(path: &Path, xml: &str) -> Result<()> {
    fs::write(path, xml).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

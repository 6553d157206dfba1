//! Output formatting for CLI commands.

use std::fs;
use std::io::Write;

use log::info;

use crate::cli::args::{BuilderArgs, OutputFormat};
use crate::error::Result;

/// Render a document according to the CLI flags.
pub fn render_document(document: &serde_json::Value, args: &BuilderArgs) -> Result<String> {
    let json = if args.pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };

    Ok(match args.output_format {
        OutputFormat::Json => json,
        OutputFormat::Human => {
            let root = document
                .as_object()
                .and_then(|obj| obj.keys().next())
                .map(String::as_str)
                .unwrap_or("<empty>");
            format!("Document rooted at '{root}':\n{json}")
        }
    })
}

/// Write a document to the output file, or stdout if none was given.
pub fn output_document(document: &serde_json::Value, args: &BuilderArgs) -> Result<()> {
    let rendered = render_document(document, args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))?;
            if args.verbosity() > 1 {
                info!("Wrote document to {}", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_compact_and_pretty() -> Result<()> {
        let doc = json!({ "term": { "user": "kimchy" } });

        let args = BuilderArgs::parse_from(["elastic-builder", "term", "--field", "u", "--value", "v"]);
        assert_eq!(render_document(&doc, &args)?, r#"{"term":{"user":"kimchy"}}"#);

        let args = BuilderArgs::parse_from([
            "elastic-builder",
            "--pretty",
            "term",
            "--field",
            "u",
            "--value",
            "v",
        ]);
        assert!(render_document(&doc, &args)?.contains('\n'));
        Ok(())
    }

    #[test]
    fn test_render_human() -> Result<()> {
        let doc = json!({ "span_not": {} });
        let args = BuilderArgs::parse_from([
            "elastic-builder",
            "-f",
            "human",
            "term",
            "--field",
            "u",
            "--value",
            "v",
        ]);
        assert!(render_document(&doc, &args)?.starts_with("Document rooted at 'span_not'"));
        Ok(())
    }

    #[test]
    fn test_output_to_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("doc.json");
        let args = BuilderArgs::parse_from([
            "elastic-builder",
            "--output",
            path.to_str().unwrap(),
            "term",
            "--field",
            "u",
            "--value",
            "v",
        ]);

        output_document(&json!({ "term": { "u": "v" } }), &args)?;
        let written = fs::read_to_string(&path)?;
        assert_eq!(written, "{\"term\":{\"u\":\"v\"}}\n");
        Ok(())
    }
}

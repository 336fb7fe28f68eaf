//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::classification::ClassificationTable;
use crate::config::{
    DATA_FIELD, DEFAULT_CODE_FIELD, DEFAULT_ENRICHMENT_FIELD, DEFAULT_HOLDER_FIELD,
    DEFAULT_INDEX_FIELD, DEFAULT_SEARCH_TAG,
};
use crate::document::DocumentConverter;
use crate::error::Result;
use crate::inject::Injector;

/// openfda-converter - Convert FDA device listing XML to JSON.
#[derive(Parser)]
#[command(name = "openfda-converter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an XML document to JSON, optionally enriched with
    /// classification data.
    Convert {
        /// Path to the input XML document
        xml: PathBuf,

        /// Path to the output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Path to an FDA classification file used to enrich product codes
        #[arg(short, long)]
        classification: Option<PathBuf>,

        /// Column that indexes each classification line
        #[arg(long, default_value = DEFAULT_INDEX_FIELD)]
        index_field: String,

        /// Parse the whole document instead of streaming by tag.
        /// Increases memory usage.
        #[arg(long)]
        no_search: bool,

        /// Tag that marks the repeating record in streaming mode
        #[arg(long, default_value = DEFAULT_SEARCH_TAG)]
        tag: String,

        /// Write compact single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            xml,
            output,
            classification,
            index_field,
            no_search,
            tag,
            compact,
        } => convert_command(
            &xml,
            &output,
            classification.as_deref(),
            &index_field,
            no_search,
            &tag,
            compact,
        ),
    }
}

/// Execute the convert command.
fn convert_command(
    xml: &Path,
    output: &Path,
    classification: Option<&Path>,
    index_field: &str,
    no_search: bool,
    tag: &str,
    compact: bool,
) -> Result<()> {
    // Load the classification table first so a bad file fails before the
    // (potentially long) XML parse
    let table = classification
        .map(|path| ClassificationTable::load(path, index_field))
        .transpose()?;

    println!(
        "{} {}",
        style("Converting").bold(),
        style(xml.display()).cyan()
    );

    let search_tag = if no_search { None } else { Some(tag) };
    let mut converter = DocumentConverter::new();
    converter.parse_file(xml, search_tag)?;

    if let Some(tag) = search_tag {
        let records = converter
            .document()?
            .get(DATA_FIELD)
            .and_then(|data| data.get(tag))
            .and_then(|records| records.as_array())
            .map_or(0, Vec::len);
        println!("  Records: {}", style(records).green());
    }

    if let Some(table) = &table {
        println!(
            "  Classification: {} entries keyed by {}",
            style(table.len()).green(),
            style(table.index_field()).green()
        );
        let injector = Injector::with_fields(
            table,
            DEFAULT_HOLDER_FIELD,
            DEFAULT_CODE_FIELD,
            DEFAULT_ENRICHMENT_FIELD,
        );
        converter.inject(&injector)?;
    }

    converter.write_json_file(output, !compact)?;

    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from([
            "openfda-converter",
            "convert",
            "devices.xml",
            "--output",
            "devices.json",
        ]);

        let Commands::Convert {
            xml,
            output,
            classification,
            index_field,
            no_search,
            tag,
            compact,
        } = cli.command;
        assert_eq!(xml, PathBuf::from("devices.xml"));
        assert_eq!(output, PathBuf::from("devices.json"));
        assert!(classification.is_none());
        assert_eq!(index_field, "PRODUCTCODE");
        assert!(!no_search);
        assert_eq!(tag, "device");
        assert!(!compact);
    }

    #[test]
    fn test_cli_parse_convert_with_overrides() {
        let cli = Cli::parse_from([
            "openfda-converter",
            "convert",
            "devices.xml",
            "--output",
            "devices.json",
            "--classification",
            "foiclass.txt",
            "--index-field",
            "DEVICENAME",
            "--no-search",
            "--compact",
        ]);

        let Commands::Convert {
            classification,
            index_field,
            no_search,
            compact,
            ..
        } = cli.command;
        assert_eq!(classification, Some(PathBuf::from("foiclass.txt")));
        assert_eq!(index_field, "DEVICENAME");
        assert!(no_search);
        assert!(compact);
    }

    #[test]
    fn test_cli_parse_tag_override() {
        let cli = Cli::parse_from([
            "openfda-converter",
            "convert",
            "devices.xml",
            "--output",
            "out.json",
            "--tag",
            "owner_operator",
        ]);

        let Commands::Convert { tag, .. } = cli.command;
        assert_eq!(tag, "owner_operator");
    }
}

//! Analyze text for single-byte rendering
//!
//! Prints the analysis, language detection, font recommendation and
//! sanitized text as JSON.
//!
//! Usage:
//!   cargo run --bin analyze_text -- "Šis ir teksts"
//!   echo "Привет, мир!" | cargo run --bin analyze_text -- --preserve cyrillic
//!   cargo run --bin analyze_text -- --catalog fonts.json --config setup.json --pretty "text"

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use glyph_oxide::fonts::{FontCatalog, FontResolver};
use glyph_oxide::setup::{FontSetup, SetupOptions};
use glyph_oxide::text::{LanguageDetector, Script, TextSanitizer};
use glyph_oxide::writer::DocumentFontContext;
use glyph_oxide::{Result, SetupConfig};

struct CliArgs {
    texts: Vec<String>,
    preserve: Option<Script>,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    options: SetupOptions,
    pretty: bool,
}

impl CliArgs {
    fn from_args() -> std::result::Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut parsed = Self {
            texts: Vec::new(),
            preserve: None,
            catalog: None,
            config: None,
            options: SetupOptions::default(),
            pretty: false,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--preserve" => {
                    i += 1;
                    let name = args.get(i).ok_or("--preserve needs a script name")?;
                    parsed.preserve = Some(parse_script(name)?);
                },
                "--catalog" => {
                    i += 1;
                    parsed.catalog = Some(PathBuf::from(args.get(i).ok_or("--catalog needs a path")?));
                },
                "--config" => {
                    i += 1;
                    parsed.config = Some(PathBuf::from(args.get(i).ok_or("--config needs a path")?));
                },
                "--font" => {
                    i += 1;
                    let font = args.get(i).ok_or("--font needs a font id")?;
                    parsed.options = parsed.options.with_font_override(font.as_str());
                },
                "--reliable" => parsed.options.use_reliable_mode = true,
                "--no-embedding" => parsed.options.allow_embedding = false,
                "--pretty" => parsed.pretty = true,
                "--help" | "-h" => return Err(usage()),
                other => parsed.texts.push(other.to_string()),
            }
            i += 1;
        }
        Ok(parsed)
    }
}

fn usage() -> String {
    "usage: analyze_text [--preserve SCRIPT] [--catalog FILE] [--config FILE] \
     [--font ID] [--reliable] [--no-embedding] [--pretty] [TEXT...]"
        .to_string()
}

fn parse_script(name: &str) -> std::result::Result<Script, String> {
    Script::ALL
        .iter()
        .copied()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("unknown script: {}", name))
}

fn run(args: CliArgs) -> Result<String> {
    let config = match &args.config {
        Some(path) => SetupConfig::from_json(&fs::read_to_string(path)?)?,
        None => SetupConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => FontCatalog::from_json(&fs::read_to_string(path)?)?,
        None => FontCatalog::builtin(),
    };

    let texts = if args.texts.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        vec![input]
    } else {
        args.texts
    };

    let detector = LanguageDetector::with_config(config.detection.clone())?;
    let resolver = FontResolver::new(catalog.clone())
        .with_minority_share(config.detection.minority_script_share)?;
    let sanitizer = TextSanitizer::new();
    let setup = FontSetup::with_config(config, catalog)?;

    let detection = detector.detect_fragments(texts.iter().map(String::as_str));
    let recommendation = resolver.resolve(&detection);
    let sanitized: Vec<_> = texts.iter().map(|t| sanitizer.sanitize(t, args.preserve)).collect();

    let mut context = DocumentFontContext::new();
    let setup_result = setup.setup_font(&mut context, &texts, &args.options);

    let report = serde_json::json!({
        "detection": detection,
        "recommendation": recommendation,
        "sanitized": sanitized,
        "setup": setup_result,
    });

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(out)
}

fn main() {
    env_logger::init();

    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        },
    };

    match run(args) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    }
}

use clap::{Parser, Subcommand};
use rust_qr_matrix::encoder::capacity::capacity;
use rust_qr_matrix::encoder::rs_blocks::rs_blocks;
use rust_qr_matrix::tools::{format_info, init_logging, symbol_stats, to_ascii};
use rust_qr_matrix::{ECLevel, EncodeOptions, MaskPattern, QrEncoder, Version};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "RustQR matrix CLI tools")]
struct Cli {
    /// Log encoder decisions (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and print the module grid
    Encode {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "H")]
        level: ECLevel,
        /// Force a version (1-40)
        #[arg(long)]
        version: Option<u8>,
        /// Force a mask pattern (0-7)
        #[arg(long)]
        mask: Option<u8>,
        #[arg(long, default_value_t = 4)]
        quiet_zone: usize,
    },
    /// Print version, capacity, block layout and mask scores for a text
    Inspect {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "H")]
        level: ECLevel,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Encode {
            text,
            level,
            version,
            mask,
            quiet_zone,
        } => encode_cmd(&text, level, version, mask, quiet_zone),
        Command::Inspect { text, level } => inspect_cmd(&text, level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    text: &str,
    level: ECLevel,
    version: Option<u8>,
    mask: Option<u8>,
    quiet_zone: usize,
) -> rust_qr_matrix::Result<()> {
    let mut options = EncodeOptions::new(level);
    if let Some(number) = version {
        options = options.with_version(Version::new(number)?);
    }
    if let Some(id) = mask {
        options = options.with_mask(MaskPattern::from_id(id)?);
    }

    let symbol = QrEncoder::new(text, &options)?.make()?;
    print!("{}", to_ascii(&symbol, quiet_zone)?);
    Ok(())
}

fn inspect_cmd(text: &str, level: ECLevel) -> rust_qr_matrix::Result<()> {
    let encoder = QrEncoder::new(text, &EncodeOptions::new(level))?;
    let version = encoder.version();

    println!("Text: {:?}", text);
    println!(
        "Version: {} ({}x{} modules)",
        version,
        version.size(),
        version.size()
    );
    println!("Level: {:?}", level);
    println!("Capacity: {} bytes", capacity(version, level));

    let blocks = rs_blocks(version, level)?;
    println!("Blocks: {}", blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        println!(
            "  block {}: total={}, data={}, ec={}",
            i,
            block.total_count(),
            block.data_count(),
            block.error_count()
        );
    }

    let scores = encoder.mask_scores()?;
    let best = encoder.best_mask_pattern()?;
    println!("Mask scores:");
    for (i, score) in scores.iter().enumerate() {
        let marker = if i == best.id() as usize { " *" } else { "" };
        println!("  mask {}: {:.2}{}", i, score, marker);
    }

    let symbol = encoder.make()?;
    let (strip_level, strip_mask) = format_info(&symbol)?;
    println!(
        "Format strip: level {:?}, mask {}",
        strip_level,
        strip_mask.id()
    );
    let stats = symbol_stats(&symbol)?;
    println!(
        "Dark modules: {}/{} ({:.1}%)",
        stats.dark_modules,
        stats.total_modules,
        stats.dark_ratio * 100.0
    );
    Ok(())
}

use anyhow::*;
use clap::{Args, Parser, Subcommand};
use fontsieve_common::{
    codepoints::{parse_hex, parse_range_list, CodepointRange},
    config::ProfileFile,
    lvgl::{ExtractConfig, DEFAULT_DISPLAY_LIMIT, DEFAULT_FALLBACK_THRESHOLD},
};
use std::{io, path::PathBuf, result::Result::Ok};

mod curate;
mod download;
mod inspect;
mod lvgl;
#[cfg(test)]
mod test_fonts;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Selects the codepoints a font is expected to cover.
#[derive(Args)]
pub struct TargetArgs {
    /// Target ranges, e.g. `0x0020-0x007D,0x0600-0x06FF`
    #[arg(long, conflicts_with = "profile")]
    ranges: Option<String>,
    /// Name of a profile in the profile file
    #[arg(long)]
    profile: Option<String>,
    /// Path of the profile file
    #[arg(long, default_value = "fontsieve.toml")]
    config: PathBuf,
}

/// A resolved coverage target.
pub struct Target {
    pub ranges: Vec<CodepointRange>,
    pub tolerance: Option<usize>,
}
impl TargetArgs {
    pub fn resolve(&self) -> Result<Target> {
        match (&self.ranges, &self.profile) {
            (Some(ranges), _) => Ok(Target { ranges: parse_range_list(ranges)?, tolerance: None }),
            (None, Some(profile)) => {
                let profiles = ProfileFile::load(&self.config)?;
                let profile = profiles.get(profile)?;
                Ok(Target { ranges: profile.target_ranges()?, tolerance: Some(profile.tolerance) })
            }
            (None, None) => bail!("Either --ranges or --profile must be given."),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the codepoints encoded in an LVGL font C source
    Lvgl {
        file: PathBuf,
        /// Don't print the character list
        #[arg(long)]
        no_chars: bool,
        /// Limit the number of characters printed
        #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
        limit: usize,
        /// Scan all hex literals when fewer codepoints than this are found
        #[arg(long, default_value_t = DEFAULT_FALLBACK_THRESHOLD)]
        fallback_threshold: usize,
        /// Ignore hex literals below this value when scanning
        #[arg(long, default_value = "0x80", value_parser = parse_hex)]
        fallback_floor: u32,
    },
    /// Prints the cmap descriptors of an LVGL font C source
    Cmaps { file: PathBuf },
    /// Prints the contiguous Unicode ranges covered by a font
    Ranges {
        font: PathBuf,
        /// Ignore codepoints below this value
        #[arg(long, value_parser = parse_hex)]
        min: Option<u32>,
    },
    /// Prints the characters of a font
    Chars {
        font: PathBuf,
        /// Ignore codepoints below this value
        #[arg(long, default_value = "0x4E00", value_parser = parse_hex)]
        min: u32,
        /// Print the first N characters
        #[arg(long, conflicts_with = "last")]
        first: Option<usize>,
        /// Print the last N characters
        #[arg(long)]
        last: Option<usize>,
    },
    /// Splits the codepoints of a font into ranges for bitmap conversion
    Chunks {
        font: PathBuf,
        /// Ignore codepoints below this value
        #[arg(long, default_value = "0x4E00", value_parser = parse_hex)]
        min: u32,
        /// Maximum number of glyphs per range
        #[arg(long, default_value_t = 256)]
        chunk_size: usize,
    },
    /// Finds the fonts in a directory that cover the target ranges
    Find {
        dir: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Copies a directory of fonts, reporting their coverage of the target ranges
    Filter {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
        /// Number of missing codepoints still tolerated
        #[arg(long)]
        tolerance: Option<usize>,
    },
    /// Downloads the variants of the fonts in a profile, removing those with poor coverage
    Download {
        output: PathBuf,
        /// Name of a profile with a download section
        #[arg(long)]
        profile: String,
        /// Path of the profile file
        #[arg(long, default_value = "fontsieve.toml")]
        config: PathBuf,
    },
}

fn execute(cli: Cli) -> Result<()> {
    let stdout = &mut io::stdout().lock();
    match cli.command {
        Commands::Lvgl { file, no_chars, limit, fallback_threshold, fallback_floor } => {
            let mut config = ExtractConfig::new(file)
                .limit(limit)
                .fallback_threshold(fallback_threshold)
                .fallback_floor(fallback_floor);
            if no_chars {
                config = config.no_chars();
            }
            lvgl::print_report(stdout, &config)?
        }
        Commands::Cmaps { file } => lvgl::print_cmaps(stdout, &file)?,
        Commands::Ranges { font, min } => inspect::print_ranges(stdout, &font, min)?,
        Commands::Chars { font, min, first, last } => {
            let selection = match last {
                Some(n) => inspect::Selection::Last(n),
                None => inspect::Selection::First(first.unwrap_or(50)),
            };
            inspect::print_chars(stdout, &font, min, selection)?
        }
        Commands::Chunks { font, min, chunk_size } => {
            inspect::print_chunks(stdout, &font, min, chunk_size)?
        }
        Commands::Find { dir, target } => curate::find_fonts(stdout, &dir, &target.resolve()?)?,
        Commands::Filter { input, output, target, tolerance } => {
            let target = target.resolve()?;
            let tolerance = tolerance
                .or(target.tolerance)
                .unwrap_or(curate::DEFAULT_TOLERANCE);
            curate::filter_fonts(stdout, &input, &output, &target, tolerance)?
        }
        Commands::Download { output, profile, config } => {
            let profiles = ProfileFile::load(&config)?;
            download::download_profile(stdout, profiles.get(&profile)?, &output)?
        }
    }
    Ok(())
}
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error encountered: {:?}", e);
            std::process::exit(1);
        }
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::ProgressBar;
use video2frames::{Action, Config, RunLog, Video2FramesError, exif, extract};

const CLI_AFTER_HELP: &str = "Examples:\n  video2frames -i input.mp4 -o frames\n  video2frames -i input.mp4 -x 25 -g -c -s 640x480\n  video2frames -d photo.jpg\n  video2frames --export-exif-template -o frames\n  video2frames -i input.mp4 -o frames --exif-data frames/exif_data.JSON\n  video2frames --completions zsh > _video2frames";

#[derive(Debug, Parser)]
#[command(
    name = "video2frames",
    version,
    about = "Extract still frames from a video file and read or write image metadata",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video file.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<String>,

    /// Output directory.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    output: String,

    /// Output image size, e.g. 600x800.
    #[arg(short = 's', long = "size", value_name = "WxH")]
    size: Option<String>,

    /// Log file output destination directory.
    #[arg(short = 'l', long = "log", value_name = "DIR")]
    log: Option<String>,

    /// Dump the exif data of the provided file instead of converting.
    #[arg(short = 'd', long = "dump", value_name = "FILE")]
    dump: Option<String>,

    /// JSON file with key exif data to write onto the output directory.
    #[arg(long = "exif-data", value_name = "FILE")]
    exif_data: Option<PathBuf>,

    /// Suffix added to every output frame filename.
    #[arg(long, value_name = "TEXT", default_value = "")]
    suffix: String,

    /// Prefix added to every output frame filename.
    #[arg(long, value_name = "TEXT", default_value = "")]
    prefix: String,

    /// Out of every 100 frames, convert this many (1-100).
    #[arg(short = 'x', long = "factor", value_name = "N", default_value_t = 100)]
    factor: i64,

    /// Encoder quality factor; values outside 1-31 are clamped.
    #[arg(short = 'q', long = "quality", value_name = "N")]
    quality: Option<i64>,

    /// Convert output frames to grayscale.
    #[arg(short = 'g', long = "grayscale")]
    grayscale: bool,

    /// Compress output into PNG format instead of uncompressed BMP.
    #[arg(short = 'c', long = "compress")]
    compress: bool,

    /// Generate a blank JSON template file for use with --exif-data.
    #[arg(long = "export-exif-template")]
    export_exif_template: bool,

    /// Generate shell completion scripts and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            input: self.input,
            output_dir: self.output,
            size: self.size,
            log_dir: self.log,
            dump_file: self.dump,
            exif_source: self.exif_data,
            prefix: self.prefix,
            suffix: self.suffix,
            factor: self.factor,
            quality: self.quality,
            grayscale: self.grayscale,
            compress: self.compress,
            export_template: self.export_exif_template,
        }
    }
}

fn run(cli: Cli, run_log: &RunLog) -> Result<(), Video2FramesError> {
    let config = cli.into_config().validate()?;

    match config.action() {
        Action::Convert => {
            println!("Generating frames...");
            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner.set_message("waiting for ffmpeg");
            let result = extract::convert(&config, run_log);
            spinner.finish_and_clear();
            result?;
            println!(
                "{} {}",
                "success:".green().bold(),
                "Finished generating frames.".green()
            );
        }
        Action::Dump => {
            if let Some(target) = &config.dump_file {
                println!("Dumping meta data now: {target}");
                exif::dump_metadata(target)?;
            }
        }
        Action::ExportTemplate => {
            exif::export_template(&config, run_log)?;
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Template written to {}{}",
                    config.output_dir,
                    exif::TEMPLATE_FILE_NAME
                )
                .green()
            );
        }
    }

    if config.exif_source.is_some() {
        println!("Writing exif data...");
        exif::write_metadata(&config, run_log)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "video2frames", &mut std::io::stdout());
        return;
    }

    let run_log = RunLog::new(cli.log.as_deref());
    if let Err(error) = run(cli, &run_log) {
        run_log.append(&error.to_string());
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;
    use video2frames::Action;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_select_conversion() {
        let cli = Cli::parse_from(["video2frames", "-i", "input.mp4"]);
        let config = cli.into_config();
        assert_eq!(config.action(), Action::Convert);
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.factor, 100);
        assert!(config.quality.is_none());
        assert!(!config.grayscale);
        assert!(!config.compress);
    }

    #[test]
    fn dump_flag_selects_dump() {
        let cli = Cli::parse_from(["video2frames", "-d", "photo.jpg"]);
        assert_eq!(cli.into_config().action(), Action::Dump);
    }

    #[test]
    fn dump_wins_over_template_export() {
        let cli = Cli::parse_from(["video2frames", "-d", "photo.jpg", "--export-exif-template"]);
        assert_eq!(cli.into_config().action(), Action::Dump);
    }

    #[test]
    fn template_flag_selects_export() {
        let cli = Cli::parse_from(["video2frames", "--export-exif-template"]);
        assert_eq!(cli.into_config().action(), Action::ExportTemplate);
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::parse_from([
            "video2frames",
            "-i",
            "in.mp4",
            "-o",
            "out",
            "-s",
            "640x480",
            "-x",
            "25",
            "-q",
            "5",
            "-g",
            "-c",
        ]);
        let config = cli.into_config();
        assert_eq!(config.input.as_deref(), Some("in.mp4"));
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.size.as_deref(), Some("640x480"));
        assert_eq!(config.factor, 25);
        assert_eq!(config.quality, Some(5));
        assert!(config.grayscale);
        assert!(config.compress);
    }
}

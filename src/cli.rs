use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stress::config::{ConfigLoader, StressConfig};
use stress::http::Materializer;
use stress::target::Targets;
use stress::utils::{RequestFormat, RequestFormatter};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// 解析目标文件并预览每个 Target 物化后的请求（不会发送）
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 目标文件，省略或为 "-" 时从 stdin 读取
    pub targets: Option<PathBuf>,

    /// 默认请求体文件
    #[arg(short, long)]
    pub body: Option<PathBuf>,

    /// 默认 header，可重复（key:value）
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// 打乱顺序使用的种子，覆盖配置文件
    #[arg(long)]
    pub seed: Option<u64>,

    /// 配置文件路径，默认自动查找 stress.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出 header 和 body 摘要
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long)]
    pub no_color: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load().unwrap_or_else(StressConfig::default),
    };
    if let Some(body) = &cli.body {
        config.defaults.body_file = Some(body.clone());
    }

    let mut cli_headers = Vec::with_capacity(cli.headers.len());
    for raw in &cli.headers {
        let header = ConfigLoader::parse_cli_header(raw)
            .with_context(|| format!("invalid header `{}`, expected key:value", raw))?;
        cli_headers.push(header);
    }
    let (body, header) = ConfigLoader::build_defaults(&config, &cli_headers)?;

    let mut targets = match cli.targets.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open targets file {}", path.display()))?;
            Targets::from_reader(BufReader::new(file), &body, &header)?
        }
        _ => Targets::from_reader(io::stdin().lock(), &body, &header)?,
    };

    if let Some(seed) = cli.seed.or(config.seed) {
        targets.shuffle(seed);
    }

    let format = if cli.verbose {
        RequestFormat::Verbose
    } else {
        RequestFormat::Compact
    };
    let formatter = RequestFormatter::new(format).with_color(!cli.no_color);
    let materializer = Materializer::new();

    let mut failed = 0;
    for target in &targets {
        match materializer.materialize(target) {
            Ok(request) => println!("{}", formatter.format(&request)),
            Err(e) => {
                failed += 1;
                println!("{}", formatter.format_error(target, &e));
            }
        }
    }

    tracing::info!(targets = targets.len(), failed, "preview finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from([
            "stress",
            "targets.txt",
            "-H",
            "Host:example.com",
            "-H",
            "X-Id:{RI[1-9]}",
            "--seed",
            "9",
            "--no-color",
        ]);
        assert_eq!(cli.targets, Some(PathBuf::from("targets.txt")));
        assert_eq!(cli.headers.len(), 2);
        assert_eq!(cli.seed, Some(9));
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_run_with_targets_file() {
        let mut targets = NamedTempFile::new().unwrap();
        targets
            .write_all(b"// preview\nGET http://x/{RI[1-3]}\nPOST http://x/post /missing/file\n")
            .unwrap();
        targets.flush().unwrap();

        let mut config = NamedTempFile::new().unwrap();
        config.write_all(b"seed = 1\n").unwrap();
        config.flush().unwrap();

        let cli = Cli::parse_from([
            OsStr::new("stress"),
            targets.path().as_os_str(),
            OsStr::new("--config"),
            config.path().as_os_str(),
            OsStr::new("--no-color"),
        ]);
        // 单个 Target 物化失败不影响整体
        run(cli).unwrap();
    }

    #[test]
    fn test_run_rejects_bad_header() {
        let cli = Cli::parse_from(["stress", "targets.txt", "-H", "nocolon"]);
        assert!(run(cli).is_err());
    }
}

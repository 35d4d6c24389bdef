//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 carousel-runtime 覆盖率
//! - `config-check`: 检查轮播配置文件（解析、取值范围）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use carousel_runtime::CarouselConfig;
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "开发辅助工具")]
struct Cli {
    /// 输出引擎的调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 carousel-runtime 覆盖率报告
    CovRuntime,
    /// 检查配置文件；目录会递归检查其中所有 .json 文件
    ConfigCheck {
        /// 配置文件或目录
        path: PathBuf,
    },
}

/// 门禁检查依次执行的 cargo 参数
const CHECK_STEPS: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

const COV_RUNTIME_ARGS: &[&str] = &[
    "llvm-cov",
    "-p",
    "carousel-runtime",
    "--all-features",
    "--html",
];

const LLVM_COV_HINT: &str = "cargo llvm-cov 不可用。
请先安装：
  - cargo install cargo-llvm-cov
  - rustup component add llvm-tools-preview
然后重试。";

/// 运行一条 cargo 命令，失败时报告完整命令行
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");
    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "{line} failed with {status}");
    Ok(())
}

/// 是否安装了 cargo-llvm-cov
fn has_llvm_cov() -> bool {
    Command::new("cargo")
        .args(["llvm-cov", "--version"])
        .output()
        .is_ok_and(|output| output.status.success())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match real_main(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::CheckAll => CHECK_STEPS.iter().try_for_each(|args| cargo(args)),
        Commands::CovRuntime => {
            anyhow::ensure!(has_llvm_cov(), "{LLVM_COV_HINT}");
            cargo(COV_RUNTIME_ARGS)?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
            Ok(())
        }
        Commands::ConfigCheck { path } => config_check(&path),
    }
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 执行配置检查
fn config_check(path: &Path) -> anyhow::Result<()> {
    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        collect_config_files(path)
    } else {
        anyhow::bail!("路径不存在: {}", path.display());
    };

    if files.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut errors = 0;
    for file in &files {
        match CarouselConfig::load(file) {
            Ok(config) => {
                eprintln!("[OK] {}", file.display());
                eprintln!("{config:#?}\n");
            }
            Err(e) => {
                eprintln!("[ERROR] {}: {}", file.display(), e);
                errors += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        anyhow::bail!("{} 个配置文件有错误", errors);
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有 .json 文件
fn collect_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

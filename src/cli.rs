//! 两个命令行程序共用的入口: 参数, 日志, 退出码

use crate::updater::{update_filters, GenreSource, UpdateResult};
use anyhow::Context;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub const SUCCESS_MESSAGE: &str = "Genres updated successfully.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub filters_path: PathBuf,
    pub base_url: String,
}

/// 解析位置参数 (不含程序名), 数量必须正好为 2
pub fn parse_args<I>(args: I) -> Option<Args>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let filters_path = args.next()?;
    let base_url = args.next()?;
    if args.next().is_some() {
        return None;
    }
    Some(Args {
        filters_path: PathBuf::from(filters_path),
        base_url: base_url.to_string_lossy().into_owned(),
    })
}

pub fn usage(source: GenreSource) -> String {
    format!(
        "Usage: {} /path/to/filters.json {}",
        source.program_name(),
        source.url_label()
    )
}

/// 日志输出到 stderr, 默认 info, 可用 RUST_LOG 覆盖
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

pub async fn run(source: GenreSource, args: &Args) -> anyhow::Result<UpdateResult> {
    update_filters(&args.filters_path, &args.base_url, source)
        .await
        .with_context(|| format!("更新 {} 失败", args.filters_path.display()))
}

/// 程序入口
pub async fn main(source: GenreSource) -> ExitCode {
    let Some(args) = parse_args(std::env::args_os().skip(1)) else {
        println!("{}", usage(source));
        return ExitCode::from(1);
    };

    init_logging();

    match run(source, &args).await {
        Ok(_) => {
            println!("{}", SUCCESS_MESSAGE);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

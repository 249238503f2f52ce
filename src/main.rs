//! rsclearurls 命令行工具
//! 加载本地规则目录，逐条清理URL并按行输出 JSON 结果

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rsclearurls::{CleanContext, CleanEngine, ConfigManager, RuleLoader, TracingLogger};

#[derive(Parser)]
#[command(name = "rsclearurls", version)]
#[command(about = "按 ClearURLs 规则目录清理URL中的追踪参数")]
struct Cli {
    /// 规则目录 JSON 文件
    #[arg(short, long)]
    rules: PathBuf,

    /// 请求的HTTP方法
    #[arg(short, long)]
    method: Option<String>,

    /// 不跳过本地地址
    #[arg(long)]
    no_local_skip: bool,

    /// 关闭完整追踪域名拦截
    #[arg(long)]
    no_domain_blocking: bool,

    /// 保留推广返利参数
    #[arg(long)]
    allow_referral_marketing: bool,

    /// 输出清理日志
    #[arg(short, long)]
    verbose: bool,

    /// 待清理的URL
    #[arg(required = true)]
    urls: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info,rsclearurls=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let registry = RuleLoader::from_path(&cli.rules)
        .with_context(|| format!("加载规则目录失败：{}", cli.rules.display()))?;

    let config = ConfigManager::custom()
        .local_hosts_skipping(!cli.no_local_skip)
        .domain_blocking(!cli.no_domain_blocking)
        .referral_marketing(cli.allow_referral_marketing)
        .logging_status(cli.verbose)
        .build();
    let engine = CleanEngine::with_config(registry, config);

    let context = cli.method.map(CleanContext::with_method);
    let logger = TracingLogger;
    let logger = cli.verbose.then_some(&logger as &dyn rsclearurls::CleanLogger);

    let mut all_ok = true;
    for url in &cli.urls {
        match engine.clean(url, context.as_ref(), logger) {
            Ok(result) => println!("{}", serde_json::to_string(&result)?),
            Err(e) => {
                all_ok = false;
                eprintln!("Error: {url}: {e}");
            }
        }
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

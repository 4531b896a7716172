use std::path::PathBuf;
use std::sync::Arc;

use structopt::StructOpt;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use monitor::config::DEFAULT_RETENTION;
use monitor::{Collector, MonitorConfig, SnapshotStore, SystemClock};
use sources::{CoinGeckoClient, PriceSource};

#[derive(Debug, StructOpt)]
#[structopt(name = "monitor", about = "암호화폐 가격 모니터")]
enum Command {
    /// 가격 수집 루프 실행
    Run(RunOpts),
    /// 저장된 히스토리 요약 출력
    Report(ReportOpts),
}

#[derive(Debug, StructOpt)]
struct RunOpts {
    /// 모니터링할 CoinGecko 코인 id 목록 (쉼표 구분)
    #[structopt(
        long,
        use_delimiter = true,
        default_value = "bitcoin,ethereum,cardano,solana,polkadot"
    )]
    symbols: Vec<String>,

    /// 수집 간격 (초)
    #[structopt(long, default_value = "60")]
    interval: u64,

    /// 가격 히스토리 저장 경로
    #[structopt(long, parse(from_os_str), default_value = "crypto_prices.json")]
    output: PathBuf,

    /// 최신 스냅샷만 따로 저장할 경로 (선택)
    #[structopt(long, parse(from_os_str))]
    latest: Option<PathBuf>,

    /// 히스토리 보존 개수
    #[structopt(long, default_value = "100")]
    retention: usize,
}

#[derive(Debug, StructOpt)]
struct ReportOpts {
    /// 가격 히스토리 저장 경로
    #[structopt(long, parse(from_os_str), default_value = "crypto_prices.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // .env가 있으면 RUST_LOG 등을 거기서 읽는다
    dotenv::dotenv().ok();

    // init logging
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = Command::from_args();

    match cmd {
        Command::Run(opts) => run_monitor(opts).await,
        Command::Report(opts) => run_report(opts),
    }
}

async fn run_monitor(opts: RunOpts) -> eyre::Result<()> {
    let config = MonitorConfig::new(
        opts.symbols,
        opts.interval,
        opts.output,
        opts.latest,
        opts.retention,
    )?;

    info!("모니터링 대상: {:?}", config.symbols);
    info!("종료하려면 Ctrl+C");

    let source: Arc<dyn PriceSource> = Arc::new(CoinGeckoClient::new());
    let store = SnapshotStore::new(
        config.history_path.clone(),
        config.latest_path.clone(),
        config.retention,
    );
    let clock = Arc::new(SystemClock);

    let collector = Collector::new(source, store, clock, config);

    // Ctrl+C → 취소 토큰. 진행 중인 사이클은 끝까지 수행된다
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("종료 신호 수신, 진행 중인 사이클을 마치고 멈춥니다");
            signal_cancel.cancel();
        }
    });

    collector.run(cancel).await;

    Ok(())
}

fn run_report(opts: ReportOpts) -> eyre::Result<()> {
    let store = SnapshotStore::new(opts.output, None, DEFAULT_RETENTION);
    let history = store
        .load_history()
        .map_err(|e| eyre::eyre!("히스토리 조회 실패: {}", e))?;

    monitor::report::print_table(&history);

    Ok(())
}

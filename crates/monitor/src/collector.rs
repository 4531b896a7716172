use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use interface::PriceSnapshot;
use sources::PriceSource;

use crate::clock::Clock;
use crate::config::MonitorConfig;
use crate::store::SnapshotStore;

/// 수집 사이클의 상태
///
/// Waiting(d) → Fetching → (Persisting | BackingOff) → Waiting → …
/// 종료 상태는 없고, 취소 신호는 Waiting에서만 루프를 끊습니다.
#[derive(Debug)]
enum Phase {
    Waiting(Duration),
    Fetching,
    Persisting(Vec<PriceSnapshot>),
    BackingOff,
}

pub struct Collector {
    source: Arc<dyn PriceSource>,
    store: SnapshotStore,
    clock: Arc<dyn Clock>,
    config: MonitorConfig,
}

impl Collector {
    pub fn new(
        source: Arc<dyn PriceSource>,
        store: SnapshotStore,
        clock: Arc<dyn Clock>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            store,
            clock,
            config,
        }
    }

    /// 취소될 때까지 수집 사이클 반복
    ///
    /// 조회 실패는 단축 백오프 후 재시도, 저장 실패는 경고만 남기고
    /// 정상 간격으로 계속합니다. 진행 중인 조회/저장은 끝까지 수행하고
    /// 대기 중에만 멈춥니다.
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            "가격 수집 루프 시작: {}개 심볼, {}초 간격",
            self.config.symbols.len(),
            self.config.interval.as_secs()
        );

        // 첫 사이클은 대기 없이 바로 조회
        let mut phase = Phase::Waiting(Duration::ZERO);

        loop {
            phase = match phase {
                Phase::Waiting(delay) => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = self.clock.sleep(delay) => Phase::Fetching,
                    }
                }
                Phase::Fetching => match self.source.fetch(&self.config.symbols).await {
                    Ok(batch) => Phase::Persisting(batch),
                    Err(e) => {
                        warn!("가격 조회 실패 ({:?}): {}", self.source.id(), e);
                        Phase::BackingOff
                    }
                },
                Phase::Persisting(batch) => {
                    self.display_prices(&batch);

                    match self.store.persist(&batch) {
                        Ok(()) => info!("수집 완료: {}개 스냅샷 저장", batch.len()),
                        Err(e) => warn!("히스토리 저장 실패: {}", e),
                    }

                    if let Err(e) = self.store.write_latest(&batch) {
                        warn!("최신 스냅샷 저장 실패: {}", e);
                    }

                    Phase::Waiting(self.config.interval)
                }
                Phase::BackingOff => Phase::Waiting(self.config.backoff()),
            };
        }

        info!("가격 수집 루프 종료");
    }

    fn display_prices(&self, batch: &[PriceSnapshot]) {
        println!(
            "\n=== Current Prices ({}) ===",
            self.clock.now().format("%H:%M:%S")
        );
        for snapshot in batch {
            println!("{:<12}: ${:.2}", snapshot.symbol, snapshot.price);
        }
        println!("=============================");
    }
}

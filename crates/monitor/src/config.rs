use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RETENTION: usize = 100;

// 실패 후 재시도 대기의 하한
const MIN_BACKOFF: Duration = Duration::from_secs(1);

/// 프로세스 수명 동안 불변인 수집 설정
///
/// 시작할 때 한 번 만들어지고, 바꾸려면 재시작해야 합니다.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub symbols: Vec<String>,
    pub interval: Duration,
    pub history_path: PathBuf,
    pub latest_path: Option<PathBuf>,
    pub retention: usize,
}

impl MonitorConfig {
    pub fn new(
        symbols: Vec<String>,
        interval_secs: u64,
        history_path: PathBuf,
        latest_path: Option<PathBuf>,
        retention: usize,
    ) -> eyre::Result<Self> {
        if symbols.is_empty() {
            return Err(eyre::eyre!("모니터링할 심볼이 하나 이상 필요합니다"));
        }
        if interval_secs == 0 {
            return Err(eyre::eyre!("수집 간격은 0보다 커야 합니다"));
        }
        if retention == 0 {
            return Err(eyre::eyre!("히스토리 보존 개수는 1 이상이어야 합니다"));
        }

        Ok(Self {
            symbols,
            interval: Duration::from_secs(interval_secs),
            history_path,
            latest_path,
            retention,
        })
    }

    /// 조회 실패 후 재시도까지의 대기 시간
    ///
    /// 정상 간격의 절반, 최소 1초. 정확한 값은 계약이 아니라 튜닝 대상입니다.
    pub fn backoff(&self) -> Duration {
        (self.interval / 2).max(MIN_BACKOFF)
    }
}

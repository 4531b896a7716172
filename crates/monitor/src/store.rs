use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use interface::PriceSnapshot;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("history file is unreadable: {0}")]
    Read(String),
    #[error("snapshot write failed: {0}")]
    Write(String),
}

/// 가격 히스토리 파일을 소유하는 저장소
///
/// 사이클마다 읽기-병합-쓰기를 한 번씩 수행합니다. 쓰기는 임시 파일에
/// 기록한 뒤 rename으로 교체하므로 읽는 쪽이 반쯤 쓰인 파일을 볼 수 없습니다.
pub struct SnapshotStore {
    history_path: PathBuf,
    latest_path: Option<PathBuf>,
    retention: usize,
}

impl SnapshotStore {
    pub fn new(history_path: PathBuf, latest_path: Option<PathBuf>, retention: usize) -> Self {
        Self {
            history_path,
            latest_path,
            retention,
        }
    }

    /// 저장된 히스토리 로드
    ///
    /// 파일이 없으면 빈 히스토리, 깨져 있으면 `Read` 에러를 돌려줍니다.
    pub fn load_history(&self) -> Result<Vec<PriceSnapshot>, StoreError> {
        let bytes = match fs::read(&self.history_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| StoreError::Read(e.to_string()))
    }

    /// 새 배치를 히스토리에 병합해서 기록
    ///
    /// 기존 파일이 깨져 있으면 빈 히스토리에서 다시 시작하고, 사이클은
    /// 실패하지 않습니다. 쓰기가 실패하면 병합 결과는 버려지고 디스크의
    /// 이전 내용이 그대로 남습니다.
    pub fn persist(&self, batch: &[PriceSnapshot]) -> Result<(), StoreError> {
        let mut history = match self.load_history() {
            Ok(history) => history,
            Err(e) => {
                warn!("기존 히스토리를 읽지 못해 비우고 다시 시작합니다: {}", e);
                Vec::new()
            }
        };

        history.extend_from_slice(batch);

        // 오래된 것부터 버리고 최근 retention개만 유지
        if history.len() > self.retention {
            let overflow = history.len() - self.retention;
            history.drain(..overflow);
        }

        write_atomic(&self.history_path, &history)
    }

    /// 최신 배치만 담는 별도 파일을 덮어쓰기
    ///
    /// 히스토리가 아니라 현재 값만 원하는 소비자용. 경로가 설정되지 않았으면
    /// 아무것도 하지 않습니다.
    pub fn write_latest(&self, batch: &[PriceSnapshot]) -> Result<(), StoreError> {
        match &self.latest_path {
            Some(path) => write_atomic(path, batch),
            None => Ok(()),
        }
    }
}

fn write_atomic(path: &Path, snapshots: &[PriceSnapshot]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
        }
    }

    // 외부 소비자가 읽는 파일이라 보기 좋게 들여쓰기
    let body =
        serde_json::to_vec_pretty(snapshots).map_err(|e| StoreError::Write(e.to_string()))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &body).map_err(|e| StoreError::Write(e.to_string()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write(e.to_string()));
    }

    Ok(())
}

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 수집 루프가 쓰는 시간 추상화
///
/// 실제 시간 대신 주입해서 대기 없이 결정적으로 테스트할 수 있습니다.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

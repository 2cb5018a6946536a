use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, info};

/// 发请求前的连通性检查；同步、无副作用
pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// 后台定时探测 TCP 端点，把结果写入原子标志，`is_connected` 只读标志
pub struct NetworkMonitor {
    online: Arc<AtomicBool>,
}

impl NetworkMonitor {
    /// 先同步探测一次，再启动后台探测任务。
    /// 任务持有弱引用，monitor 被释放后自动退出。
    pub async fn start(addr: String, interval: Duration, timeout: Duration) -> Self {
        let initial = probe(&addr, timeout).await;
        info!(addr = %addr, online = initial, "network monitor started");
        let online = Arc::new(AtomicBool::new(initial));
        let weak: Weak<AtomicBool> = Arc::downgrade(&online);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(100)));
            // interval 的第一次 tick 立即返回，初始状态已探测过
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let now = probe(&addr, timeout).await;
                let Some(flag) = weak.upgrade() else {
                    break;
                };
                let before = flag.swap(now, Ordering::Relaxed);
                if before != now {
                    info!(addr = %addr, online = now, "connectivity changed");
                }
            }
        });

        Self { online }
    }

    /// 手动覆盖当前状态（探测间隔内已知断网时使用）
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl Connectivity for NetworkMonitor {
    fn is_connected(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

/// 能否在 `timeout` 内建立到 `addr` 的 TCP 连接
pub async fn probe(addr: &str, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            debug!(addr, error = %e, "connectivity probe failed");
            false
        }
        Err(_) => {
            debug!(addr, "connectivity probe timed out");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn probe_reaches_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        assert!(probe(&addr, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn probe_fails_on_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);
        assert!(!probe(&addr, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn monitor_reports_initial_probe_and_overrides() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let monitor =
            NetworkMonitor::start(addr, Duration::from_secs(60), Duration::from_secs(1)).await;
        assert!(monitor.is_connected());

        monitor.set_online(false);
        assert!(!monitor.is_connected());
    }
}

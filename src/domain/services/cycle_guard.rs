//! # Cycle Guard Service
//!
//! サイクル世代の管理
//!
//! 新しいサイクルを開始すると世代が進み、古いサイクルのトークンは無効になる。
//! 古いポーリングループの結果が新しい状態を上書きしないためのルール。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// サイクル世代カウンタ
#[derive(Debug, Clone, Default)]
pub struct CycleGuard {
    current: Arc<AtomicU64>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいサイクルを開始し、そのトークンを返す
    ///
    /// それまでに発行された全トークンは `is_current() == false` になる。
    pub fn begin(&self) -> CycleToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        CycleToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// 現在の世代
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// 1つのサイクルに束縛されたトークン
#[derive(Debug, Clone)]
pub struct CycleToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl CycleToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// このサイクルがまだ最新かどうか
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// どのガードにも属さない単独のトークン（常に最新）
    pub fn detached() -> Self {
        CycleGuard::new().begin()
    }
}

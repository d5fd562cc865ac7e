//! # cvsubmit
//!
//! CVのドライブリンクを処理サービスに送信し、結果を待つツール
//!
//! 単一リンクは受付の応答で結果が返る。CSVでまとめたバッチはジョブとして受け付けられ、
//! 完了するまで1秒間隔でステータスを確認する。バッチの完了は一度だけ通知される。
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: 送信要求・結果・サイクル状態などのエンティティ（外部依存なし）
//! - **Application層**: 送信・ポーリング・通知のユースケースとサイクルのオーケストレーション
//! - **Adapter層**: 外部システムとの統合（HTTP API, デスクトップ通知, 設定ファイル）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;

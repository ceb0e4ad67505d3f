//! # SMS 中継サーバー ライブラリ
//!
//! 家主向けアプリから受け取った依頼を、テナントの表示情報を添えて
//! SMS ゲートウェイへ中継する HTTP 関数のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（CORS）
//! - `usecase`: SMS 中継のビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

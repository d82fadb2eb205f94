//! Portfolio Contact - 作品集网站后端服务
//!
//! 基于 Actix Web 构建，负责联系表单的接收、持久化与邮件通知，
//! 同时托管作品集静态页面。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `mail`: 邮件通知（SMTP / 日志）
//! - `middlewares`: 速率限制中间件
//! - `models`: 数据模型定义
//! - `routes`: HTTP 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod mail;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

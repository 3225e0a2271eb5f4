//! LVA Submission Portal - 课程作业提交门户后端服务
//!
//! 基于 Actix Web 构建，身份与角色由 Keycloak 提供。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `identity`: Keycloak 管理 API 客户端
//! - `middlewares`: 认证中间件
//! - `models`: 数据模型定义
//! - `routes`: HTTP 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod identity;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

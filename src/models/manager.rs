use crate::classify::postprocess::NUM_CLASSES;
use crate::models::LesionClassifier;
use crate::utils::error::ClassifyError;
use crate::{Config, Result};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;

/// 全局模型管理器单例
pub struct ModelManager {
    classifier: Arc<LesionClassifier>,
    config: Config,
}

static MODEL_MANAGER: OnceCell<Arc<Mutex<ModelManager>>> = OnceCell::new();

impl ModelManager {
    /// 初始化全局模型管理器
    pub fn init(config: Config) -> Result<()> {
        tracing::info!("Initializing model manager...");

        let classifier = Arc::new(LesionClassifier::new(&config)?);

        let manager = ModelManager {
            classifier,
            config,
        };

        MODEL_MANAGER.set(Arc::new(Mutex::new(manager)))
            .map_err(|_| ClassifyError::Internal("Failed to initialize model manager".to_string()))?;

        tracing::info!("Model manager initialized successfully");
        Ok(())
    }

    /// 获取全局模型管理器实例
    pub fn instance() -> Result<Arc<Mutex<ModelManager>>> {
        MODEL_MANAGER.get()
            .cloned()
            .ok_or_else(|| ClassifyError::Internal("Model manager not initialized".to_string()))
    }

    /// 获取分类器引用
    pub fn classifier(&self) -> Arc<LesionClassifier> {
        Arc::clone(&self.classifier)
    }

    /// 获取配置引用
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 模型健康检查
    pub fn health_check(&self) -> Result<()> {
        tracing::debug!("Performing model health check...");

        if !self.config.model_path().exists() {
            return Err(ClassifyError::ModelLoad(format!(
                "Model file missing: {}",
                self.config.model_path().display()
            )));
        }

        tracing::debug!("Model health check passed");
        Ok(())
    }

    /// 获取模型统计信息
    pub fn get_stats(&self) -> ModelStats {
        ModelStats {
            model_loaded: true,
            num_classes: NUM_CLASSES,
            intra_threads: self.config.onnx_config.intra_threads,
            optimization_level: self.config.onnx_config.optimization_level,
        }
    }
}

/// 模型统计信息
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelStats {
    pub model_loaded: bool,
    pub num_classes: usize,
    pub intra_threads: usize,
    pub optimization_level: i32,
}

/// 便捷函数：获取分类器
pub fn get_classifier() -> Result<Arc<LesionClassifier>> {
    let manager = ModelManager::instance()?;
    let guard = manager.lock();
    Ok(guard.classifier())
}

/// 便捷函数：检查模型健康状态
pub fn health_check() -> Result<()> {
    let manager = ModelManager::instance()?;
    let guard = manager.lock();
    guard.health_check()
}

/// 便捷函数：获取模型统计信息
pub fn get_model_stats() -> Result<ModelStats> {
    let manager = ModelManager::instance()?;
    let guard = manager.lock();
    Ok(guard.get_stats())
}

use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器绑定地址
    pub bind_addr: String,

    /// 模型文件目录
    pub models_dir: PathBuf,

    /// 工作线程数量
    pub workers: usize,

    /// 开发模式
    pub dev_mode: bool,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,

    /// 服务器配置
    pub server_config: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,

    /// 优化级别
    pub optimization_level: i32,

    /// 启用图优化
    pub enable_optimization: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 请求超时时间（秒）
    pub request_timeout: u64,

    /// 最大请求体大小（字节）
    pub max_request_size: usize,

    /// 最大并发连接数
    pub max_connections: usize,
}

impl Config {
    pub fn new(
        bind_addr: String,
        models_dir: String,
        workers: Option<usize>,
        dev_mode: bool,
    ) -> Result<Self> {
        let cpu_cores = num_cpus::get();
        let workers = workers.unwrap_or(cpu_cores);

        let onnx_config = OnnxConfig {
            intra_threads: (cpu_cores * 3 / 4).max(1), // 使用75%的CPU核心
            optimization_level: 3, // 最高优化级别
            enable_optimization: true,
        };

        let server_config = ServerConfig {
            request_timeout: if dev_mode { 300 } else { 60 }, // 开发模式更长超时
            max_request_size: 50 * 1024 * 1024, // 50MB
            max_connections: if dev_mode { 10 } else { 1000 },
        };

        Ok(Self {
            bind_addr,
            models_dir: PathBuf::from(models_dir),
            workers,
            dev_mode,
            onnx_config,
            server_config,
        })
    }

    /// 获取分类模型路径
    ///
    /// 模型资产沿用训练侧的命名（早期版本为model_cnn_01）
    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join("model_cnn_92.onnx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_path_is_under_models_dir() {
        let config = Config::new("0.0.0.0:5006".to_string(), "models".to_string(), None, false)
            .unwrap();
        assert_eq!(config.model_path(), PathBuf::from("models/model_cnn_92.onnx"));
    }

    #[test]
    fn dev_mode_relaxes_timeouts() {
        let dev = Config::new("0.0.0.0:5006".to_string(), "models".to_string(), None, true)
            .unwrap();
        let prod = Config::new("0.0.0.0:5006".to_string(), "models".to_string(), None, false)
            .unwrap();
        assert!(dev.server_config.request_timeout > prod.server_config.request_timeout);
    }

    #[test]
    fn explicit_workers_override_cpu_count() {
        let config = Config::new("0.0.0.0:5006".to_string(), "models".to_string(), Some(2), false)
            .unwrap();
        assert_eq!(config.workers, 2);
        assert!(config.onnx_config.intra_threads >= 1);
    }
}

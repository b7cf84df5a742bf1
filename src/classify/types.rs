use serde::{Deserialize, Serialize};
use std::fmt;

/// 皮肤病变类别
///
/// 顺序与模型训练时的类别索引一一对应，禁止运行时重排
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassLabel {
    Benign,
    Malignant,
    Carcinoma,
}

impl ClassLabel {
    /// 按模型输出索引排列的类别表
    pub const ALL: [ClassLabel; 3] = [
        ClassLabel::Benign,
        ClassLabel::Malignant,
        ClassLabel::Carcinoma,
    ];

    /// 从类别索引查表
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Benign => "Benign",
            ClassLabel::Malignant => "Malignant",
            ClassLabel::Carcinoma => "Carcinoma",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次推理的预测结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// 类别索引 (0-2)
    pub index: usize,
    /// 预测类别
    pub label: ClassLabel,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f32,
}

/// 完整的API预测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 预测类别标签
    pub label: String,
    /// 类别索引
    pub class_index: usize,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f32,
    /// 格式化的置信度百分比，如 "65.90%"
    pub confidence_percent: String,
    /// 用户可见的结果行，如 "Benign: 65.90%"
    pub display: String,
    /// 三个类别的完整概率分布
    pub probabilities: Vec<f32>,
    /// 处理耗时（秒）
    pub processing_time: f32,
    /// 模型信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelInfo>,
}

/// 模型信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// 模型版本
    pub model_version: String,
    /// 类别数量
    pub num_classes: usize,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            model_version: "model_cnn_92".to_string(),
            num_classes: ClassLabel::ALL.len(),
        }
    }
}

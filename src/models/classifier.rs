use crate::classify::postprocess::NUM_CLASSES;
use crate::utils::error::ClassifyError;
use crate::{Config, Result};
use ndarray::{Array3, Axis};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::{Tensor, ValueType},
    inputs,
};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct LesionClassifier {
    session: Arc<Mutex<Session>>,
    input_name: String, // 动态发现的输入名称
    output_name: String, // 动态发现的输出名称
}

impl LesionClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = config.model_path();

        if !model_path.exists() {
            return Err(ClassifyError::ModelLoad(
                format!("Classification model not found: {}", model_path.display())
            ));
        }

        tracing::info!("Loading classification model from: {}", model_path.display());

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.onnx_config.intra_threads)?
            .commit_from_file(&model_path)?;

        // 动态发现输入名称
        let input_name = if session.inputs.is_empty() {
            return Err(ClassifyError::ModelLoad(
                "Classification model has no inputs".to_string()
            ));
        } else {
            let input_name = session.inputs[0].name.clone();
            tracing::info!("Classification model input: '{}'", input_name);
            input_name
        };

        // 动态发现输出名称
        let output_name = if session.outputs.is_empty() {
            return Err(ClassifyError::ModelLoad(
                "Classification model has no outputs".to_string()
            ));
        } else {
            let output_name = session.outputs[0].name.clone();
            tracing::info!("Classification model output: '{}'", output_name);

            // 记录所有可用输出用于调试
            for (i, output) in session.outputs.iter().enumerate() {
                tracing::debug!("Classification output[{}]: '{}'", i, output.name);
            }

            output_name
        };

        // 静态声明的输出维度在加载期就能对上类别表，不用等到首次推理
        if let ValueType::Tensor { shape, .. } = &session.outputs[0].output_type {
            Self::validate_output_dimensions(shape)?;
        }

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            output_name,
        })
    }

    /// 校验模型声明的输出维度与类别表兼容
    ///
    /// 最后一维是类别轴；动态维度（导出器记为-1或0）留给后处理按实际输出校验
    fn validate_output_dimensions(dimensions: &[i64]) -> Result<()> {
        if let Some(&classes) = dimensions.last() {
            if classes > 0 && classes != NUM_CLASSES as i64 {
                return Err(ClassifyError::ModelLoad(format!(
                    "Model reports {} output classes, expected {}",
                    classes, NUM_CLASSES
                )));
            }
        }
        Ok(())
    }

    /// 运行分类模型，返回原始分数向量（未经softmax）
    ///
    /// 输入为预处理后的224x224x3张量，内部补上batch维度。
    /// 输出向量长度由后处理按类别表校验。
    pub fn predict(&self, input: Array3<f32>) -> Result<Vec<f32>> {
        // 添加batch维度 (1, 224, 224, 3)
        let input_tensor = input.insert_axis(Axis(0));

        // 推理 - 立即提取数据避免生命周期冲突
        let input_tensor = Tensor::from_array(input_tensor)?;
        let predictions = {
            let mut session = self.session.lock();
            let outputs = session.run(inputs![self.input_name.as_str() => input_tensor])?;

            // 使用动态发现的输出名称
            match outputs.get(&self.output_name) {
                Some(output) => output.try_extract_array::<f32>()?.into_owned(),
                None => {
                    // 提供详细的错误诊断信息
                    let available_outputs: Vec<String> =
                        outputs.keys().map(|s| s.to_string()).collect();
                    return Err(ClassifyError::Inference(format!(
                        "Classification output '{}' not found. Available outputs: {:?}",
                        self.output_name, available_outputs
                    )));
                }
            }
        };

        // 去掉batch维度，期望 (1, N) 或 (N,)
        let shape = predictions.shape().to_vec();
        let scores: Vec<f32> = match shape.as_slice() {
            [1, _] | [_] => predictions.iter().copied().collect(),
            _ => {
                return Err(ClassifyError::Inference(format!(
                    "Unexpected classification output shape: {:?}",
                    shape
                )));
            }
        };

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_three_class_output_is_accepted() {
        assert!(LesionClassifier::validate_output_dimensions(&[1, 3]).is_ok());
        assert!(LesionClassifier::validate_output_dimensions(&[3]).is_ok());
    }

    #[test]
    fn static_mismatched_class_axis_is_rejected_at_load() {
        for dims in [vec![1, 5], vec![5], vec![1, 2]] {
            match LesionClassifier::validate_output_dimensions(&dims) {
                Err(ClassifyError::ModelLoad(msg)) => {
                    assert!(msg.contains("expected 3"), "unexpected message: {}", msg);
                }
                other => panic!("expected ModelLoad for {:?}, got {:?}", dims, other.err()),
            }
        }
    }

    #[test]
    fn dynamic_dimensions_defer_to_postprocess() {
        // 动态批次维度不影响类别轴校验
        assert!(LesionClassifier::validate_output_dimensions(&[-1, 3]).is_ok());
        // 类别轴本身是动态时，留给首次推理的后处理校验
        assert!(LesionClassifier::validate_output_dimensions(&[1, -1]).is_ok());
        assert!(LesionClassifier::validate_output_dimensions(&[]).is_ok());
    }
}

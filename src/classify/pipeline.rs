use crate::{
    classify::postprocess,
    classify::types::{ModelInfo, PredictionResult},
    image::{ImageLoader, Preprocessor},
    models::get_classifier,
    Result,
};
use image::DynamicImage;
use std::time::Instant;

/// 分类处理流水线
pub struct ClassifyPipeline;

impl ClassifyPipeline {
    /// 处理base64图像
    pub async fn process_base64(base64_data: &str) -> Result<PredictionResult> {
        let start_time = Instant::now();

        let image = ImageLoader::from_base64(base64_data)?;

        Self::process_image(image, start_time).await
    }

    /// 处理字节流图像
    pub async fn process_bytes(bytes: axum::body::Bytes) -> Result<PredictionResult> {
        let start_time = Instant::now();

        let image = ImageLoader::from_bytes(bytes)?;

        Self::process_image(image, start_time).await
    }

    /// 核心推理流水线：预处理 -> 模型 -> 后处理
    async fn process_image(image: DynamicImage, start_time: Instant) -> Result<PredictionResult> {
        ImageLoader::validate_dimensions(&image)?;

        // 预处理：拉伸到224x224并归一化
        let image_array = ImageLoader::to_array3(&image);
        let input_tensor = Preprocessor::preprocess(&image_array);

        // 推理
        let classifier = get_classifier()?;
        let inference_start = Instant::now();
        let scores = classifier.predict(input_tensor)?;
        let inference_time = inference_start.elapsed();

        // 后处理：softmax + argmax + 标签映射
        let prediction = postprocess::postprocess(&scores)?;
        let probabilities = postprocess::softmax(&scores);

        let total_time = start_time.elapsed();

        tracing::info!(
            "Prediction completed: label={}, confidence={:.4}, inference_time={:.3}s, total_time={:.3}s",
            prediction.label,
            prediction.confidence,
            inference_time.as_secs_f32(),
            total_time.as_secs_f32()
        );

        Ok(PredictionResult {
            label: prediction.label.to_string(),
            class_index: prediction.index,
            confidence: prediction.confidence,
            confidence_percent: postprocess::format_confidence(prediction.confidence),
            display: postprocess::format_result_line(prediction.label, prediction.confidence),
            probabilities,
            processing_time: total_time.as_secs_f32(),
            model_info: Some(ModelInfo::default()),
        })
    }
}

use crate::utils::error::ClassifyError;
use crate::Result;
use axum::body::Bytes;
use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat};
use ndarray::Array3;

/// 最大图像文件大小（50MB）
const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

pub struct ImageLoader;

impl ImageLoader {
    /// 从base64字符串加载图像
    pub fn from_base64(base64_data: &str) -> Result<DynamicImage> {
        // 检测并移除可能的数据URL前缀 (data:image/xxx;base64,)
        let base64_clean = if base64_data.starts_with("data:") {
            base64_data.split(',').nth(1).unwrap_or(base64_data)
        } else {
            base64_data
        };

        // 解码base64
        let image_bytes = base64::engine::general_purpose::STANDARD
            .decode(base64_clean)
            .map_err(ClassifyError::Base64)?;

        // 检查文件大小
        if image_bytes.len() > MAX_IMAGE_BYTES {
            return Err(ClassifyError::FileTooLarge(image_bytes.len(), MAX_IMAGE_BYTES));
        }

        // 解码图像
        let image = image::load_from_memory(&image_bytes)
            .map_err(ClassifyError::ImageDecode)?;

        Ok(image)
    }

    /// 从字节流加载图像
    pub fn from_bytes(bytes: Bytes) -> Result<DynamicImage> {
        // 检查文件大小
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ClassifyError::FileTooLarge(bytes.len(), MAX_IMAGE_BYTES));
        }

        let image = image::load_from_memory(&bytes)
            .map_err(ClassifyError::ImageDecode)?;

        Ok(image)
    }

    /// 从文件路径加载图像
    pub fn from_path(path: &str) -> Result<DynamicImage> {
        let image = image::open(path)
            .map_err(ClassifyError::ImageDecode)?;

        Ok(image)
    }

    /// 检测图像格式
    pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }

    /// 验证图像格式是否支持
    pub fn is_supported_format(format: ImageFormat) -> bool {
        matches!(format,
            ImageFormat::Png |
            ImageFormat::Jpeg |
            ImageFormat::Bmp |
            ImageFormat::Tiff |
            ImageFormat::WebP
        )
    }

    /// 转换DynamicImage为ndarray::Array3<f32> (HWC格式，原始0-255通道值)
    pub fn to_array3(image: &DynamicImage) -> Array3<f32> {
        let rgb_image = image.to_rgb8();
        let (width, height) = rgb_image.dimensions();
        let raw_data = rgb_image.into_raw();

        let mut array = Array3::<f32>::zeros((height as usize, width as usize, 3));

        for (i, pixel_value) in raw_data.iter().enumerate() {
            let h = (i / 3) / width as usize;
            let w = (i / 3) % width as usize;
            let c = i % 3;
            array[[h, w, c]] = *pixel_value as f32;
        }

        array
    }

    /// 验证图像尺寸
    ///
    /// 预处理会把任意尺寸拉伸到模型输入大小，这里只挡掉空图和超大图
    pub fn validate_dimensions(image: &DynamicImage) -> Result<()> {
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(ClassifyError::InvalidInput(
                format!("Empty image: {}x{}", width, height)
            ));
        }

        if width > 8192 || height > 8192 {
            return Err(ClassifyError::InvalidInput(
                format!("Image too large: {}x{}, maximum 8192x8192", width, height)
            ));
        }

        Ok(())
    }
}

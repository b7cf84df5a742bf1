use ndarray::Array3;

/// 模型输入高度
pub const INPUT_HEIGHT: usize = 224;
/// 模型输入宽度
pub const INPUT_WIDTH: usize = 224;
/// 模型输入通道数
pub const INPUT_CHANNELS: usize = 3;

/// 归一化均值
pub const IMAGE_MEAN: f32 = 0.0;
/// 归一化标准差（通道值除以255映射到[0,1]）
pub const IMAGE_STD: f32 = 255.0;

pub struct Preprocessor;

impl Preprocessor {
    /// 分类模型预处理流水线
    ///
    /// 任意尺寸的HWC图像（通道值0-255）拉伸为224x224并归一化到[0,1]。
    /// 拉伸不保持宽高比，与模型训练时的固定输入约定一致。
    pub fn preprocess(image: &Array3<f32>) -> Array3<f32> {
        let resized = Self::resize_bilinear(image, INPUT_HEIGHT, INPUT_WIDTH);
        resized.mapv_into(|v| (v - IMAGE_MEAN) / IMAGE_STD)
    }

    /// 双线性插值缩放到目标尺寸（拉伸，不填充）
    fn resize_bilinear(
        image: &Array3<f32>,
        target_height: usize,
        target_width: usize,
    ) -> Array3<f32> {
        let (orig_h, orig_w, channels) = image.dim();
        let mut resized = Array3::<f32>::zeros((target_height, target_width, channels));

        let scale_h = orig_h as f32 / target_height as f32;
        let scale_w = orig_w as f32 / target_width as f32;

        for h in 0..target_height {
            for w in 0..target_width {
                let src_h = (h as f32 * scale_h).min(orig_h as f32 - 1.0);
                let src_w = (w as f32 * scale_w).min(orig_w as f32 - 1.0);

                let h1 = src_h.floor() as usize;
                let h2 = (h1 + 1).min(orig_h - 1);
                let w1 = src_w.floor() as usize;
                let w2 = (w1 + 1).min(orig_w - 1);

                let dh = src_h - h1 as f32;
                let dw = src_w - w1 as f32;

                for c in 0..channels {
                    let v11 = image[[h1, w1, c]];
                    let v12 = image[[h1, w2, c]];
                    let v21 = image[[h2, w1, c]];
                    let v22 = image[[h2, w2, c]];

                    let interpolated = v11 * (1.0 - dh) * (1.0 - dw)
                        + v12 * (1.0 - dh) * dw
                        + v21 * dh * (1.0 - dw)
                        + v22 * dh * dw;

                    resized[[h, w, c]] = interpolated;
                }
            }
        }

        resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_image(height: usize, width: usize, value: f32) -> Array3<f32> {
        Array3::from_elem((height, width, INPUT_CHANNELS), value)
    }

    #[test]
    fn output_shape_is_fixed_for_small_input() {
        let input = uniform_image(10, 10, 128.0);
        let tensor = Preprocessor::preprocess(&input);
        assert_eq!(tensor.dim(), (INPUT_HEIGHT, INPUT_WIDTH, INPUT_CHANNELS));
    }

    #[test]
    fn output_shape_is_fixed_for_large_input() {
        let input = uniform_image(3000, 4000, 37.0);
        let tensor = Preprocessor::preprocess(&input);
        assert_eq!(tensor.dim(), (INPUT_HEIGHT, INPUT_WIDTH, INPUT_CHANNELS));
    }

    #[test]
    fn max_channel_value_maps_to_one() {
        let input = uniform_image(50, 30, 255.0);
        let tensor = Preprocessor::preprocess(&input);
        for &v in tensor.iter() {
            assert_relative_eq!(v, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_channel_value_maps_to_zero() {
        let input = uniform_image(30, 50, 0.0);
        let tensor = Preprocessor::preprocess(&input);
        for &v in tensor.iter() {
            assert_relative_eq!(v, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn all_outputs_stay_in_unit_range() {
        // 渐变图覆盖整个0-255范围
        let mut input = Array3::<f32>::zeros((64, 48, INPUT_CHANNELS));
        for h in 0..64 {
            for w in 0..48 {
                for c in 0..INPUT_CHANNELS {
                    input[[h, w, c]] = ((h * w + c * 7) % 256) as f32;
                }
            }
        }

        let tensor = Preprocessor::preprocess(&input);
        for &v in tensor.iter() {
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn identity_size_input_is_preserved() {
        let mut input = uniform_image(INPUT_HEIGHT, INPUT_WIDTH, 0.0);
        input[[100, 100, 1]] = 255.0;

        let tensor = Preprocessor::preprocess(&input);
        assert_relative_eq!(tensor[[100, 100, 1]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(tensor[[0, 0, 0]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn single_pixel_input_broadcasts() {
        let input = uniform_image(1, 1, 51.0);
        let tensor = Preprocessor::preprocess(&input);
        assert_eq!(tensor.dim(), (INPUT_HEIGHT, INPUT_WIDTH, INPUT_CHANNELS));
        for &v in tensor.iter() {
            assert_relative_eq!(v, 0.2, epsilon = 1e-6);
        }
    }
}

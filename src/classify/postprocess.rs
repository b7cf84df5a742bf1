use crate::classify::types::{ClassLabel, Prediction};
use crate::utils::error::ClassifyError;
use crate::Result;

/// 模型输出的类别数，由训练时的模型结构固定
pub const NUM_CLASSES: usize = 3;

/// 数值稳定的softmax
///
/// 先减去最大值再取指数，避免大分数溢出。
/// 结果每个元素落在[0,1]且总和为1（浮点误差内）。
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = scores.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|v| v / sum).collect()
}

/// 返回最大值首次出现的索引（并列时取最小索引）
///
/// 空切片返回0，不会panic
pub fn argmax(values: &[f32]) -> usize {
    let mut max_index = 0;
    let mut max = f32::NEG_INFINITY;

    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            max_index = i;
        }
    }

    max_index
}

/// 分类模型后处理：原始分数向量 -> 预测结果
///
/// 输出向量长度必须恰好为NUM_CLASSES，否则说明换了不兼容的模型
pub fn postprocess(output: &[f32]) -> Result<Prediction> {
    if output.len() != NUM_CLASSES {
        return Err(ClassifyError::InvalidInputShape {
            expected: NUM_CLASSES,
            actual: output.len(),
        });
    }

    let probabilities = softmax(output);
    let index = argmax(&probabilities);

    let label = ClassLabel::from_index(index).ok_or_else(|| {
        ClassifyError::Internal(format!("Class index {} out of label table", index))
    })?;

    Ok(Prediction {
        index,
        label,
        confidence: probabilities[index],
    })
}

/// 置信度格式化为两位小数的百分比，如 "65.90%"
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// 用户可见的结果行，如 "Benign: 65.90%"
pub fn format_result_line(label: ClassLabel, confidence: f32) -> String {
    format!("{}: {}", label.as_str(), format_confidence(confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn softmax_sums_to_one() {
        for scores in [
            vec![2.0, 1.0, 0.1],
            vec![-5.0, 0.0, 5.0],
            vec![100.0, 100.0, 100.0],
            vec![0.0, 0.0, 0.0],
        ] {
            let probs = softmax(&scores);
            let sum: f32 = probs.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
            for &p in &probs {
                assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
            }
        }
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let scores = [2.0, 1.0, 0.1];
        let shifted: Vec<f32> = scores.iter().map(|v| v + 1000.0).collect();

        let base = softmax(&scores);
        let moved = softmax(&shifted);

        for (a, b) in base.iter().zip(moved.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn softmax_survives_large_scores() {
        // 不做最大值平移时 e^1000 会溢出为inf
        let probs = softmax(&[1000.0, 999.0, 998.0]);
        let sum: f32 = probs.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        assert!(probs.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn argmax_breaks_ties_toward_lowest_index() {
        assert_eq!(argmax(&[0.5, 0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.1, 0.4, 0.4]), 1);
    }

    #[test]
    fn argmax_tolerates_empty_slice() {
        assert_eq!(argmax(&[]), 0);
        assert_eq!(argmax(&[0.7]), 0);
    }

    #[test]
    fn benign_scenario() {
        let prediction = postprocess(&[2.0, 1.0, 0.1]).unwrap();

        assert_eq!(prediction.index, 0);
        assert_eq!(prediction.label, ClassLabel::Benign);
        assert_relative_eq!(prediction.confidence, 0.659, epsilon = 1e-3);

        let probs = softmax(&[2.0, 1.0, 0.1]);
        assert_relative_eq!(probs[0], 0.659, epsilon = 1e-3);
        assert_relative_eq!(probs[1], 0.242, epsilon = 1e-3);
        assert_relative_eq!(probs[2], 0.099, epsilon = 1e-3);

        assert_eq!(format_confidence(prediction.confidence), "65.90%");
        assert_eq!(
            format_result_line(prediction.label, prediction.confidence),
            "Benign: 65.90%"
        );
    }

    #[test]
    fn malignant_scenario() {
        let prediction = postprocess(&[0.1, 5.0, 0.1]).unwrap();
        assert_eq!(prediction.index, 1);
        assert_eq!(prediction.label, ClassLabel::Malignant);
    }

    #[test]
    fn uniform_scores_yield_uniform_distribution_and_first_class() {
        let probs = softmax(&[1.0, 1.0, 1.0]);
        for &p in &probs {
            assert_relative_eq!(p, 1.0 / 3.0, epsilon = 1e-5);
        }

        let prediction = postprocess(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(prediction.index, 0);
        assert_eq!(prediction.label, ClassLabel::Benign);
        assert_relative_eq!(prediction.confidence, 1.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn wrong_output_length_is_rejected() {
        for bad in [vec![], vec![0.3], vec![0.1, 0.9], vec![0.1, 0.2, 0.3, 0.4]] {
            match postprocess(&bad) {
                Err(ClassifyError::InvalidInputShape { expected, actual }) => {
                    assert_eq!(expected, NUM_CLASSES);
                    assert_eq!(actual, bad.len());
                }
                other => panic!("expected InvalidInputShape, got {:?}", other),
            }
        }
    }

    #[test]
    fn confidence_formatting_uses_two_decimals() {
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
        assert_eq!(format_confidence(1.0 / 3.0), "33.33%");
    }
}

/// `[start, stop]` 구간을 `count`개의 등간격 점으로 나눈다. 양 끝점을 포함하며
/// 마지막 점은 누적 오차 없이 정확히 `stop`이 되도록 맞춘다.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            out[count - 1] = stop;
            out
        }
    }
}

/// 주위 온도에서 최종 평균 온도까지 선형으로 오르는 곡선.
pub fn linear_ramp(times_s: &[f64], duration_s: f64, ambient_c: f64, delta_t_c: f64) -> Vec<f64> {
    times_s
        .iter()
        .map(|t| ambient_c + delta_t_c * (t / duration_s))
        .collect()
}

/// 각 점에 고정 배율을 곱한다.
pub fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

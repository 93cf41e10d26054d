/// 선형 보간 방식의 분위수. 입력은 비어 있지 않고 오름차순으로 정렬돼 있어야 한다.
pub fn quantile_linear(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

/// 수열의 중앙값. 빈 수열이면 None.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(quantile_linear(&sorted, 0.5))
}

/// IQR 기반 이상치 분류 결과.
#[derive(Debug, Clone)]
pub struct OutlierSet {
    /// 1사분위수
    pub q1: f64,
    /// 3사분위수
    pub q3: f64,
    /// 상한 경계 = Q3 + 1.5·IQR
    pub upper_whisker: f64,
    /// 하한 경계 = Q1 − 1.5·IQR
    pub lower_whisker: f64,
    /// 상한을 초과한 위치 인덱스 (오름차순)
    pub high: Vec<usize>,
    /// 하한 미만의 위치 인덱스 (오름차순)
    pub low: Vec<usize>,
}

impl OutlierSet {
    /// 사분위 범위 = Q3 − Q1.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// 총손실 수열에서 고/저 이상치 인덱스를 찾는다.
///
/// 경계 비교는 엄격 부등호이므로 모든 값이 같으면 두 집합 모두 비어 있다.
/// 같은 입력에 대해 항상 같은 결과를 낸다.
pub fn detect(values: &[f64]) -> OutlierSet {
    if values.is_empty() {
        return OutlierSet {
            q1: 0.0,
            q3: 0.0,
            upper_whisker: 0.0,
            lower_whisker: 0.0,
            high: Vec::new(),
            low: Vec::new(),
        };
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q1 = quantile_linear(&sorted, 0.25);
    let q3 = quantile_linear(&sorted, 0.75);
    let iqr = q3 - q1;
    let upper_whisker = q3 + 1.5 * iqr;
    let lower_whisker = q1 - 1.5 * iqr;
    let mut high = Vec::new();
    let mut low = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        if value > upper_whisker {
            high.push(index);
        }
        if value < lower_whisker {
            low.push(index);
        }
    }
    OutlierSet {
        q1,
        q3,
        upper_whisker,
        lower_whisker,
        high,
        low,
    }
}

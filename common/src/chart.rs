//! 円グラフ用の集計（CLI/WASM共通）
//!
//! 条項結果をチャート種別ごとのキーで数え上げ、name/count のバケット列にする。
//! キーの並びは初出順。

use crate::types::ClauseResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;

/// キーが取れなかった場合のバケット名
pub const UNKNOWN_KEY: &str = "Unknown";

/// 凡例・スライスの配色
pub const PALETTE: [&str; 16] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A28CF0", "#FF6699",
    "#33CC99", "#9966FF", "#FF4444", "#FFCC00", "#66CCFF", "#99FF99",
    "#FF9966", "#CC99FF", "#66FFCC", "#FF66B2",
];

/// チャート種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// phase1.predicted_clause_type
    ClauseType,
    /// phase3.risk_level
    RiskLevel,
}

impl ChartKind {
    pub fn field_path(&self) -> &'static str {
        match self {
            ChartKind::ClauseType => "phase1.predicted_clause_type",
            ChartKind::RiskLevel => "phase3.risk_level",
        }
    }

    /// 条項から集計キーを取り出す
    pub fn key<'a>(&self, clause: &'a ClauseResult) -> &'a str {
        match self {
            ChartKind::ClauseType => clause.clause_type().unwrap_or(UNKNOWN_KEY),
            ChartKind::RiskLevel => clause.risk_level().map(|r| r.label()).unwrap_or(UNKNOWN_KEY),
        }
    }
}

/// チャートの1区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub name: String,
    pub value: usize,
}

/// キーごとに件数を数える
///
/// 全バケットの value 合計は必ず `results.len()` になる。
pub fn group_by(results: &[ClauseResult], kind: ChartKind) -> Vec<ChartBucket> {
    let mut buckets: Vec<ChartBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for clause in results {
        let key = kind.key(clause);
        match index.get(key) {
            Some(&i) => buckets[i].value += 1,
            None => {
                index.insert(key, buckets.len());
                buckets.push(ChartBucket {
                    name: key.to_string(),
                    value: 1,
                });
            }
        }
    }

    buckets
}

/// キー → 色 の対応表
///
/// 初めて見たキーに空いている色を割り当て、以後はなるべく変えない。
/// ただし1つのグラフの中で色が重なる場合は、後のキーに別の色を割り当て直す。
/// 16区分まではグラフ内の色が必ず異なる。
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    assigned: HashMap<String, &'static str>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// バケット列の色をまとめて割り当てる
    pub fn assign(&mut self, buckets: &[ChartBucket]) -> Vec<&'static str> {
        let mut used: Vec<&'static str> = Vec::with_capacity(buckets.len());

        for bucket in buckets {
            let color = match self.assigned.get(bucket.name.as_str()) {
                Some(&color) if !used.contains(&color) => color,
                _ => {
                    let color = self.free_color(&used);
                    self.assigned.insert(bucket.name.clone(), color);
                    color
                }
            };
            used.push(color);
        }

        used
    }

    /// 誰も使っていない色 → このグラフで未使用の色 → 循環 の順
    fn free_color(&self, used: &[&'static str]) -> &'static str {
        PALETTE
            .iter()
            .copied()
            .find(|c| !self.assigned.values().any(|a| a == c))
            .or_else(|| PALETTE.iter().copied().find(|c| !used.contains(c)))
            .unwrap_or(PALETTE[used.len() % PALETTE.len()])
    }
}

/// 円グラフの1スライス（SVG座標）
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
    /// 全体に対する割合 (0.0-1.0)
    pub fraction: f64,
    /// SVG path の d 属性。全円の場合は None（circle で描く）
    pub path: Option<String>,
    pub label_x: f64,
    pub label_y: f64,
}

/// バケット列をスライスに変換
///
/// 12時の位置から時計回りに描く。`colors` は `buckets` と同じ長さを想定し、
/// 足りない分はパレット順で埋める。
pub fn pie_slices(
    buckets: &[ChartBucket],
    colors: &[&'static str],
    cx: f64,
    cy: f64,
    radius: f64,
) -> Vec<PieSlice> {
    let total: usize = buckets.iter().map(|b| b.value).sum();
    if total == 0 {
        return Vec::new();
    }

    let point = |angle: f64, r: f64| (cx + r * angle.sin(), cy - r * angle.cos());
    let label_radius = radius * 0.65;
    let mut start = 0.0_f64;

    buckets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.value > 0)
        .map(|(i, bucket)| {
            let fraction = bucket.value as f64 / total as f64;
            let sweep = fraction * 2.0 * PI;
            let end = start + sweep;
            let (label_x, label_y) = point(start + sweep / 2.0, label_radius);

            let path = if bucket.value == total {
                None
            } else {
                let (x0, y0) = point(start, radius);
                let (x1, y1) = point(end, radius);
                let large_arc = if sweep > PI { 1 } else { 0 };
                Some(format!(
                    "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
                ))
            };

            start = end;
            PieSlice {
                name: bucket.name.clone(),
                value: bucket.value,
                color: colors.get(i).copied().unwrap_or(PALETTE[i % PALETTE.len()]),
                fraction,
                path,
                label_x,
                label_y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase1, Phase3, RiskLevel};

    fn clause(clause_type: Option<&str>, risk: Option<RiskLevel>) -> ClauseResult {
        ClauseResult {
            clause: "text".to_string(),
            phase1: clause_type.map(|t| Phase1 {
                predicted_clause_type: Some(t.to_string()),
                confidence: Some(0.9),
            }),
            phase3: risk.map(|r| Phase3 {
                risk_level: Some(r),
                ..Default::default()
            }),
        }
    }

    fn bucket(name: &str, value: usize) -> ChartBucket {
        ChartBucket {
            name: name.to_string(),
            value,
        }
    }

    // =============================================
    // group_by テスト
    // =============================================

    #[test]
    fn test_group_by_empty() {
        assert!(group_by(&[], ChartKind::ClauseType).is_empty());
        assert!(group_by(&[], ChartKind::RiskLevel).is_empty());
    }

    #[test]
    fn test_group_by_first_seen_order() {
        let results = vec![
            clause(Some("Termination"), None),
            clause(Some("Payment"), None),
            clause(Some("Termination"), None),
            clause(Some("Confidentiality"), None),
        ];

        let buckets = group_by(&results, ChartKind::ClauseType);
        assert_eq!(
            buckets,
            vec![
                bucket("Termination", 2),
                bucket("Payment", 1),
                bucket("Confidentiality", 1),
            ]
        );
    }

    #[test]
    fn test_group_by_missing_phase1_is_unknown() {
        let results = vec![clause(None, None), clause(Some("Payment"), None)];
        let buckets = group_by(&results, ChartKind::ClauseType);
        assert_eq!(buckets, vec![bucket(UNKNOWN_KEY, 1), bucket("Payment", 1)]);
    }

    #[test]
    fn test_group_by_missing_leaf_is_unknown() {
        let mut c = clause(Some("x"), None);
        c.phase1 = Some(Phase1::default());
        let buckets = group_by(&[c], ChartKind::ClauseType);
        assert_eq!(buckets, vec![bucket(UNKNOWN_KEY, 1)]);
    }

    #[test]
    fn test_group_by_risk_level() {
        let results = vec![
            clause(None, Some(RiskLevel::High)),
            clause(None, Some(RiskLevel::Low)),
            clause(None, None),
            clause(None, Some(RiskLevel::High)),
            clause(None, Some(RiskLevel::Unknown)),
        ];

        let buckets = group_by(&results, ChartKind::RiskLevel);
        assert_eq!(
            buckets,
            vec![bucket("high", 2), bucket("low", 1), bucket(UNKNOWN_KEY, 2)]
        );
    }

    #[test]
    fn test_group_by_total_matches_len() {
        let kinds = ["A", "B", "C", "D"];
        let risks = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
        let results: Vec<ClauseResult> = (0..37)
            .map(|i| {
                let t = if i % 5 == 0 { None } else { Some(kinds[i % kinds.len()]) };
                let r = if i % 7 == 0 { None } else { Some(risks[i % risks.len()]) };
                clause(t, r)
            })
            .collect();

        for kind in [ChartKind::ClauseType, ChartKind::RiskLevel] {
            let total: usize = group_by(&results, kind).iter().map(|b| b.value).sum();
            assert_eq!(total, results.len(), "{}", kind.field_path());
        }
    }

    // =============================================
    // ColorMap テスト
    // =============================================

    #[test]
    fn test_color_map_stable_per_key() {
        let mut colors = ColorMap::new();
        let first = colors.assign(&[bucket("a", 1), bucket("b", 1)]);
        let second = colors.assign(&[bucket("b", 3), bucket("c", 1), bucket("a", 2)]);

        assert_eq!(first, vec![PALETTE[0], PALETTE[1]]);
        assert_eq!(second, vec![PALETTE[1], PALETTE[2], PALETTE[0]]);
    }

    /// 16色を使い切った後でも、1つのグラフ内の色は重ならない
    #[test]
    fn test_color_map_distinct_after_palette_exhausted() {
        let mut colors = ColorMap::new();
        let many: Vec<ChartBucket> = (0..PALETTE.len())
            .map(|i| bucket(&format!("T{i}"), 1))
            .collect();
        colors.assign(&many);

        let assigned = colors.assign(&[bucket("T0", 2), bucket("NewType", 1)]);
        assert_eq!(assigned[0], PALETTE[0]);
        assert_ne!(assigned[0], assigned[1]);

        // 割り当て直した色はその後も維持される
        let again = colors.assign(&[bucket("T0", 2), bucket("NewType", 1)]);
        assert_eq!(again, assigned);
    }

    #[test]
    fn test_color_map_distinct_for_full_palette() {
        let mut colors = ColorMap::new();
        colors.assign(&[bucket("x", 1), bucket("y", 1)]);
        let buckets: Vec<ChartBucket> = (0..PALETTE.len())
            .map(|i| bucket(&format!("k{i}"), 1))
            .collect();
        let assigned = colors.assign(&buckets);

        let mut unique = assigned.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), PALETTE.len());
    }

    // =============================================
    // pie_slices テスト
    // =============================================

    #[test]
    fn test_pie_slices_empty() {
        assert!(pie_slices(&[], &[], 150.0, 150.0, 100.0).is_empty());
    }

    #[test]
    fn test_pie_slices_single_bucket_is_full_circle() {
        let slices = pie_slices(&[bucket("only", 4)], &["#123456"], 150.0, 150.0, 100.0);
        assert_eq!(slices.len(), 1);
        assert!(slices[0].path.is_none());
        assert_eq!(slices[0].fraction, 1.0);
        assert_eq!(slices[0].color, "#123456");
    }

    #[test]
    fn test_pie_slices_fractions_sum_to_one() {
        let buckets = vec![bucket("a", 1), bucket("b", 2), bucket("c", 5)];
        let slices = pie_slices(&buckets, &[], 150.0, 150.0, 100.0);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(slices.iter().all(|s| s.path.is_some()));
        assert_eq!(slices[2].color, PALETTE[2]);
    }

    #[test]
    fn test_pie_slices_large_arc_flag() {
        let buckets = vec![bucket("big", 3), bucket("small", 1)];
        let slices = pie_slices(&buckets, &[], 150.0, 150.0, 100.0);
        let big = slices[0].path.as_deref().unwrap();
        let small = slices[1].path.as_deref().unwrap();
        assert!(big.contains(" 0 1 1 "));
        assert!(small.contains(" 0 0 1 "));
        // 12時の位置から始まる
        assert!(big.starts_with("M 150.00 150.00 L 150.00 50.00"));
    }
}

use crate::catalog::models::{Catalog, Series};

/// Tolerance constants for the two matching phases.
///
/// The defaults are empirically chosen and preserved exactly for compatibility
/// with existing frame assets; they are a value rather than inline constants so
/// callers (and tests) can tighten or loosen them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerances {
    /// Maximum relative difference between horizontal and vertical scale
    /// factors for a screenshot to count as a uniformly scaled exact match.
    pub scale_uniformity: f64,
    /// Width of the near-best similar group in the exact pass.
    pub exact_similar: f64,
    /// Maximum relative aspect-ratio difference admitted by the fallback pass.
    pub ratio_cutoff: f64,
    /// Width of the near-best similar group in the ratio pass.
    pub ratio_similar: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            scale_uniformity: 0.001,
            exact_similar: 0.001,
            ratio_cutoff: 0.005,
            ratio_similar: 0.0001,
        }
    }
}

/// Outcome of a detection call.
///
/// `model: None` with empty `matches` is the legitimate "unsupported device"
/// result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Best-matching model name, if any.
    pub model: Option<String>,
    /// Every plausible match, best first. Duplicates impossible.
    pub matches: Vec<String>,
}

impl Detection {
    fn none() -> Self {
        Self {
            model: None,
            matches: Vec::new(),
        }
    }
}

/// One scored catalog entry. Lower score = better match.
#[derive(Clone, Debug)]
struct Candidate<'a> {
    name: &'a str,
    score: f64,
    series: Series,
}

/// Candidates tagged by the phase that produced them, so each phase's
/// similar-group window stays distinct.
enum PhaseMatches<'a> {
    Exact(Vec<Candidate<'a>>),
    Ratio(Vec<Candidate<'a>>),
}

/// Detect the device model for a screenshot of `width` x `height` pixels,
/// preferring `prefer` when several generations tie, with default tolerances.
///
/// Pure and deterministic; never fails. See [`detect_with`].
pub fn detect(catalog: &Catalog, width: u32, height: u32, prefer: Series) -> Detection {
    detect_with(catalog, width, height, prefer, &Tolerances::default())
}

/// [`detect`] with explicit [`Tolerances`].
///
/// Input is normalized to portrait form first (mockups are always authored in
/// portrait; a landscape screenshot is a rotated portrait one). The exact pass
/// admits bit-identical resolutions and uniformly scaled ones; only when it
/// comes up empty does the looser aspect-ratio fallback run.
pub fn detect_with(
    catalog: &Catalog,
    width: u32,
    height: u32,
    prefer: Series,
    tol: &Tolerances,
) -> Detection {
    if width == 0 || height == 0 {
        return Detection::none();
    }
    let (w, h) = portrait(width, height);

    let exact = exact_pass(catalog, w, h, tol);
    let phase = if exact.is_empty() {
        let ratio = ratio_pass(catalog, w, h, tol);
        if ratio.is_empty() {
            return Detection::none();
        }
        PhaseMatches::Ratio(ratio)
    } else {
        PhaseMatches::Exact(exact)
    };

    let (candidates, similar_window) = match phase {
        PhaseMatches::Exact(c) => (c, tol.exact_similar),
        PhaseMatches::Ratio(c) => (c, tol.ratio_similar),
    };
    resolve(candidates, similar_window, prefer)
}

fn portrait(width: u32, height: u32) -> (u32, u32) {
    if width > height {
        (height, width)
    } else {
        (width, height)
    }
}

/// Bit-identical resolutions score 0; uniformly scaled ones score their
/// distance from true 1:1 size.
fn exact_pass<'a>(catalog: &'a Catalog, w: u32, h: u32, tol: &Tolerances) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    for model in catalog.iter() {
        let (ew, eh) = model.resolution;
        if w == ew && h == eh {
            candidates.push(Candidate {
                name: &model.name,
                score: 0.0,
                series: model.series,
            });
            continue;
        }

        let scale_w = f64::from(w) / f64::from(ew);
        let scale_h = f64::from(h) / f64::from(eh);
        if (scale_w - scale_h).abs() / scale_w.max(scale_h) < tol.scale_uniformity {
            candidates.push(Candidate {
                name: &model.name,
                score: (scale_w - 1.0).abs(),
                series: model.series,
            });
        }
    }
    candidates
}

/// Fallback for slightly cropped or resaved screenshots that lose the exact
/// pixel match: compare portrait aspect ratios instead.
fn ratio_pass<'a>(catalog: &'a Catalog, w: u32, h: u32, tol: &Tolerances) -> Vec<Candidate<'a>> {
    let observed = f64::from(h) / f64::from(w);
    let mut candidates = Vec::new();
    for model in catalog.iter() {
        let (ew, eh) = model.resolution;
        let expected = f64::from(eh) / f64::from(ew);
        let diff = (observed - expected).abs() / expected;
        if diff < tol.ratio_cutoff {
            candidates.push(Candidate {
                name: &model.name,
                score: diff,
                series: model.series,
            });
        }
    }
    candidates
}

/// Sort ascending by score and pick the winner: inside the near-best similar
/// group the preferred series wins, otherwise the lowest score does. Ties fall
/// back to catalog insertion order (the sort is stable).
fn resolve(mut candidates: Vec<Candidate<'_>>, similar_window: f64, prefer: Series) -> Detection {
    candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
    let best_score = candidates[0].score;
    let similar: Vec<&Candidate<'_>> = candidates
        .iter()
        .take_while(|c| (c.score - best_score).abs() < similar_window)
        .collect();

    let winner = if similar.len() > 1 {
        similar
            .iter()
            .find(|c| c.series == prefer)
            .copied()
            .unwrap_or(similar[0])
    } else {
        &candidates[0]
    };

    Detection {
        model: Some(winner.name.to_string()),
        matches: candidates.iter().map(|c| c.name.to_string()).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detect/matcher.rs"]
mod tests;

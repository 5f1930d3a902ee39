use std::fmt::Write as _;

use aula_core::simulation::{CoinFlipSimulator as Simulator, DiceThrow};
use dioxus::prelude::*;
use serde_json::Value;

const CHART_WIDTH: f64 = 300.0;
const CHART_HEIGHT: f64 = 160.0;
const SPARK_HEIGHT: f64 = 60.0;

/// Bar heights for heads and tails, scaled to the taller bar.
fn bar_heights(heads: u64, tails: u64, max_height: f64) -> (f64, f64) {
    let top = heads.max(tails);
    if top == 0 {
        return (0.0, 0.0);
    }
    #[allow(clippy::cast_precision_loss)]
    let scale = |count: u64| count as f64 / top as f64 * max_height;
    (scale(heads), scale(tails))
}

/// Polyline path of the running heads proportion, 0 at the bottom edge.
fn sparkline_path(proportions: &[f64], width: f64, height: f64) -> String {
    let mut path = String::new();
    let steps = proportions.len().saturating_sub(1).max(1);
    for (index, proportion) in proportions.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = index as f64 / steps as f64 * width;
        let y = height - proportion * height;
        let command = if index == 0 { 'M' } else { 'L' };
        // Writing to a String cannot fail.
        let _ = write!(path, "{command} {x:.1} {y:.1} ");
    }
    path.trim_end().to_string()
}

fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    #[allow(clippy::cast_precision_loss)]
    let value = part as f64 / total as f64 * 100.0;
    format!("{value:.1}%")
}

/// Repeated coin flips with counts, a bar chart and a running-proportion line.
#[component]
pub fn CoinFlipSimulator(config: Value) -> Element {
    let probability = config
        .get("probabilityHeads")
        .and_then(Value::as_f64)
        .unwrap_or(0.5);
    let max_history = config
        .get("maxHistory")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(Simulator::DEFAULT_MAX_HISTORY);
    let mut simulator =
        use_signal(move || Simulator::with_probability(probability).with_max_history(max_history));

    let sim = simulator.read();
    let (heads, tails, total) = (sim.heads(), sim.tails(), sim.total());
    let (heads_bar, tails_bar) = bar_heights(heads, tails, CHART_HEIGHT - 30.0);
    let spark = sparkline_path(&sim.running_proportion(), CHART_WIDTH, SPARK_HEIGHT);
    drop(sim);
    let half = SPARK_HEIGHT / 2.0;
    let heads_y = CHART_HEIGHT - 20.0 - heads_bar;
    let tails_y = CHART_HEIGHT - 20.0 - tails_bar;
    let baseline = CHART_HEIGHT - 5.0;

    rsx! {
        div { class: "coin-flip",
            div { class: "controls",
                button {
                    r#type: "button",
                    onclick: move |_| {
                        simulator.write().flip(&mut rand::rng());
                    },
                    "Lanzar una vez"
                }
                button {
                    r#type: "button",
                    onclick: move |_| simulator.write().flip_many(&mut rand::rng(), Simulator::BULK_FLIPS),
                    "Lanzar 1,000 veces"
                }
                button {
                    r#type: "button",
                    class: "link",
                    onclick: move |_| simulator.write().reset(),
                    "Reiniciar"
                }
            }
            div { class: "counts",
                div { strong { "Cabeza" } div { "{heads}" } small { {percent(heads, total)} } }
                div { strong { "Escudo" } div { "{tails}" } small { {percent(tails, total)} } }
                div { strong { "Total" } div { "{total}" } small { "—" } }
            }
            svg {
                class: "coin-chart",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                role: "img",
                rect { class: "bar bar--heads", x: "60", y: "{heads_y}", width: "60", height: "{heads_bar}" }
                rect { class: "bar bar--tails", x: "180", y: "{tails_y}", width: "60", height: "{tails_bar}" }
                text { x: "90", y: "{baseline}", text_anchor: "middle", "H" }
                text { x: "210", y: "{baseline}", text_anchor: "middle", "T" }
            }
            svg {
                class: "coin-sparkline",
                view_box: "0 0 {CHART_WIDTH} {SPARK_HEIGHT}",
                line { class: "reference", x1: "0", y1: "{half}", x2: "{CHART_WIDTH}", y2: "{half}" }
                path { class: "spark-line", d: "{spark}", fill: "none" }
            }
        }
    }
}

/// Throw two dice on demand.
#[component]
pub fn DiceThrowAnimation() -> Element {
    let mut last = use_signal(|| None::<DiceThrow>);

    rsx! {
        div { class: "dice-throw",
            img { class: "dice-gif", src: "/dado-rotando.gif", alt: "Dados rodando" }
            button {
                r#type: "button",
                onclick: move |_| last.set(Some(DiceThrow::roll(&mut rand::rng()))),
                "Lanzar dados"
            }
            if let Some(throw) = last() {
                p { class: "dice-result",
                    "{throw.first} + {throw.second} = {throw.sum()}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_taller_count() {
        assert_eq!(bar_heights(0, 0, 100.0), (0.0, 0.0));
        assert_eq!(bar_heights(50, 25, 100.0), (100.0, 50.0));
    }

    #[test]
    fn sparkline_spans_the_width() {
        let path = sparkline_path(&[1.0, 0.5, 0.0], 100.0, 10.0);
        assert_eq!(path, "M 0.0 0.0 L 50.0 5.0 L 100.0 10.0");
        assert_eq!(sparkline_path(&[], 100.0, 10.0), "");
    }

    #[test]
    fn percent_handles_no_flips() {
        assert_eq!(percent(0, 0), "0.0%");
        assert_eq!(percent(1, 3), "33.3%");
    }
}

use std::collections::BTreeMap;

use aula_core::model::ExerciseResponse;
use aula_core::venn::{COMPLEMENT_A, Region, RegionShape, UNION, UNIVERSE, VennConfig, construct};
use dioxus::prelude::*;
use serde_json::Value;

use super::{prop_str, prop_strings};
use crate::views::lesson::{ExerciseContext, InlineText};
use crate::vm::{
    cardinality_totals, label_anchor, placement_bins, region_info, toggle_region, tokenize,
};

const DEFAULT_NAMES: [&str; 5] = ["Lucas", "Carlos", "Mateo", "Felipe", "Luis"];

fn region_class(selected: bool) -> &'static str {
    if selected {
        "venn-region venn-region--selected"
    } else {
        "venn-region"
    }
}

/// Region id to display text; numbers and strings are both accepted.
fn prop_labels(props: &Value, key: &str) -> Vec<(String, String)> {
    props
        .get(key)
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(region, value)| {
                    let text = match value {
                        Value::String(text) => text.clone(),
                        Value::Number(n) => n.to_string(),
                        _ => return None,
                    };
                    Some((region.clone(), text))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn set_names(props: &Value) -> (String, String) {
    let name = |key, fallback: &str| {
        let value = prop_str(props, key);
        if value.is_empty() {
            fallback.to_string()
        } else {
            value
        }
    };
    (name("leftSet", "A"), name("rightSet", "B"))
}

/// Two overlapping circles inside the universe rectangle.
#[component]
fn VennCanvas(
    config: VennConfig,
    #[props(default)] selected: Vec<Region>,
    #[props(default)] labels: Vec<(Region, String)>,
    #[props(default = ("A".to_string(), "B".to_string()))] set_names: (String, String),
    on_region: Option<Callback<Region>>,
) -> Element {
    let (cx_a, cy) = config.circle_a();
    let (cx_b, _) = config.circle_b();
    let (left, right) = set_names;
    let label_y = cy - config.radius;
    let left_x = cx_a - config.radius * 0.7;
    let right_x = cx_b + config.radius * 0.7;

    rsx! {
        svg {
            class: if on_region.is_some() { "venn venn--interactive" } else { "venn" },
            width: "{config.width}",
            height: "{config.height}",
            view_box: "0 0 {config.width} {config.height}",
            for outline in construct(&config) {
                match outline.shape {
                    RegionShape::Rect { width, height } => rsx! {
                        rect {
                            key: "{outline.region.id()}",
                            x: "0",
                            y: "0",
                            width: "{width}",
                            height: "{height}",
                            class: region_class(selected.contains(&outline.region)),
                            onclick: move |_| {
                                if let Some(on_region) = on_region {
                                    on_region.call(outline.region);
                                }
                            },
                        }
                    },
                    RegionShape::Path { d } => rsx! {
                        path {
                            key: "{outline.region.id()}",
                            d: "{d}",
                            class: region_class(selected.contains(&outline.region)),
                            onclick: move |_| {
                                if let Some(on_region) = on_region {
                                    on_region.call(outline.region);
                                }
                            },
                        }
                    },
                }
            }
            text { class: "venn-set", x: "{left_x}", y: "{label_y}", "{left}" }
            text { class: "venn-set", x: "{right_x}", y: "{label_y}", "{right}" }
            for (region, label) in labels {
                {
                    let (x, y) = label_anchor(&config, region);
                    rsx! {
                        text {
                            key: "{region.id()}",
                            class: "venn-label",
                            x: "{x}",
                            y: "{y}",
                            text_anchor: "middle",
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

/// Click regions to select them.
#[component]
pub fn VennDiagram() -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut selected = use_signal(Vec::<Region>::new);

    let on_region = use_callback(move |region: Region| {
        toggle_region(&mut selected.write(), region);
        let ids = selected.read().iter().map(|r| r.id().to_string()).collect();
        ctx.set_response(ExerciseResponse::VennDiagramSelect(ids));
    });

    rsx! {
        VennCanvas { config: VennConfig::DEFAULT, selected: selected(), on_region }
    }
}

#[component]
pub fn VennDiagramStatic(config: Value) -> Element {
    let highlighted: Vec<Region> = prop_strings(&config, "highlightedRegions")
        .iter()
        .filter_map(|id| Region::from_id(id))
        .collect();
    let labels = prop_labels(&config, "cardinalities")
        .into_iter()
        .filter_map(|(id, text)| Region::from_id(&id).map(|region| (region, text)))
        .collect::<Vec<_>>();

    rsx! {
        VennCanvas {
            config: VennConfig::DEFAULT,
            selected: highlighted,
            labels,
            set_names: set_names(&config),
        }
    }
}

/// Two disjoint sets. Regions are named `A`, `B` and `Outside`.
#[component]
pub fn VennDiagramMutuallyExclusive(config: Value) -> Element {
    const WIDTH: f64 = 500.0;
    const HEIGHT: f64 = 300.0;
    const RADIUS: f64 = 100.0;
    const CX_A: f64 = 130.0;
    const CX_B: f64 = 370.0;
    const CY: f64 = 150.0;

    let highlighted = prop_strings(&config, "highlightedRegions");
    let class = |region: &str| region_class(highlighted.iter().any(|h| h == region));
    let (left, right) = set_names(&config);
    let (left_x, right_x, label_y) = (CX_A - 8.0, CX_B - 8.0, CY - 20.0);
    let counts = prop_labels(&config, "cardinalities")
        .into_iter()
        .filter_map(|(region, text)| {
            let (x, y) = match region.as_str() {
                "A" => (CX_A, CY),
                "B" => (CX_B, CY),
                "Outside" => (WIDTH / 2.0, HEIGHT - 30.0),
                _ => return None,
            };
            Some((region, x, y, text))
        })
        .collect::<Vec<_>>();

    rsx! {
        svg { class: "venn", width: "{WIDTH}", height: "{HEIGHT}",
            rect { x: "0", y: "0", width: "{WIDTH}", height: "{HEIGHT}", class: class("Outside") }
            circle { cx: "{CX_A}", cy: "{CY}", r: "{RADIUS}", class: class("A") }
            circle { cx: "{CX_B}", cy: "{CY}", r: "{RADIUS}", class: class("B") }
            text { class: "venn-set", x: "{left_x}", y: "{label_y}", "{left}" }
            text { class: "venn-set", x: "{right_x}", y: "{label_y}", "{right}" }
            for (region, x, y, text) in counts {
                text { key: "{region}", class: "venn-label", x: "{x}", y: "{y}", text_anchor: "middle", "{text}" }
            }
        }
    }
}

/// Explorer: select regions or a preset and read what set they form.
#[component]
pub fn VennDiagramInfo() -> Element {
    let mut selected = use_signal(|| vec![Region::Intersection]);
    let on_region = use_callback(move |region: Region| toggle_region(&mut selected.write(), region));
    let info = region_info(&selected.read());
    let presets: [(&str, Vec<Region>); 5] = [
        ("Universo", UNIVERSE.to_vec()),
        ("Unión", UNION.to_vec()),
        ("Intersección", vec![Region::Intersection]),
        ("Diferencia", vec![Region::OnlyA]),
        ("Complemento", COMPLEMENT_A.to_vec()),
    ];

    rsx! {
        div { class: "venn-info",
            VennCanvas { config: VennConfig::DEFAULT, selected: selected(), on_region }
            div { class: "presets",
                for (label, regions) in presets {
                    button {
                        key: "{label}",
                        r#type: "button",
                        onclick: move |_| selected.set(regions.clone()),
                        "{label}"
                    }
                }
            }
            div { class: "region-info",
                span { strong { "Región: " } span { class: "math math--inline", "{info.notation}" } }
                p { strong { "Explicación: " } InlineText { tokens: tokenize(info.explanation) } }
            }
        }
    }
}

/// Place each name in a region: pick a chip, then click the region.
/// Clicking a placed chip sends it back to the tray.
#[component]
pub fn VennDiagramDragNDrop(config: Value) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let names = {
        let names = prop_strings(&config, "names");
        if names.is_empty() {
            DEFAULT_NAMES.iter().map(|n| (*n).to_string()).collect()
        } else {
            names
        }
    };
    let mut placements = use_signal(BTreeMap::<String, Region>::new);
    let mut picked = use_signal(|| None::<String>);

    let publish = move || {
        ctx.set_response(ExerciseResponse::VennDiagramDnd(placement_bins(&placements.read())));
    };
    let on_region = use_callback(move |region: Region| {
        if let Some(name) = picked.take() {
            placements.write().insert(name, region);
            publish();
        }
    });
    let on_unplace = use_callback(move |name: String| {
        placements.write().remove(&name);
        publish();
    });

    let labels = Region::ALL
        .into_iter()
        .filter_map(|region| {
            let names = placements
                .read()
                .iter()
                .filter(|(_, r)| **r == region)
                .map(|(name, _)| name.clone())
                .collect::<Vec<_>>();
            (!names.is_empty()).then(|| (region, names.join(", ")))
        })
        .collect::<Vec<_>>();
    let unplaced = names
        .iter()
        .filter(|name| !placements.read().contains_key(*name))
        .cloned()
        .collect::<Vec<_>>();
    let placed = placements.read().keys().cloned().collect::<Vec<_>>();

    rsx! {
        div { class: "venn-dnd",
            div { class: "tray",
                for name in unplaced {
                    button {
                        key: "{name}",
                        r#type: "button",
                        class: if picked.read().as_deref() == Some(name.as_str()) { "chip chip--selected" } else { "chip" },
                        onclick: move |_| picked.set(Some(name.clone())),
                        "{name}"
                    }
                }
            }
            VennCanvas { config: VennConfig::DEFAULT, labels, on_region }
            if !placed.is_empty() {
                div { class: "tray tray--placed",
                    for name in placed {
                        button {
                            key: "{name}",
                            r#type: "button",
                            class: "chip",
                            onclick: move |_| on_unplace.call(name.clone()),
                            "{name} ✕"
                        }
                    }
                }
            }
        }
    }
}

/// Type the number of elements in each region.
#[component]
pub fn VennCardinality() -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut counts = use_signal(|| {
        Region::ALL
            .into_iter()
            .map(|region| (region.id().to_string(), "0".to_string()))
            .collect::<BTreeMap<_, _>>()
    });
    let mut focused = use_signal(|| None::<Region>);
    let on_region = use_callback(move |region: Region| focused.set(Some(region)));

    let config = VennConfig::DEFAULT;
    let totals = cardinality_totals(&counts.read());

    rsx! {
        div { class: "venn-cardinality",
            div { class: "venn-cardinality-canvas",
                VennCanvas { config, selected: focused().into_iter().collect::<Vec<_>>(), on_region }
                for region in Region::ALL {
                    {
                        let (x, y) = label_anchor(&config, region);
                        let value = counts.read().get(region.id()).cloned().unwrap_or_default();
                        rsx! {
                            input {
                                key: "{region.id()}",
                                class: "count-input",
                                r#type: "number",
                                min: "0",
                                style: "left: {x}px; top: {y}px;",
                                aria_label: "{region.tex()}",
                                value: "{value}",
                                onfocus: move |_| focused.set(Some(region)),
                                oninput: move |evt| {
                                    counts.write().insert(region.id().to_string(), evt.value());
                                    ctx.set_response(ExerciseResponse::VennCardinality(counts.read().clone()));
                                },
                            }
                        }
                    }
                }
            }
            table { class: "totals",
                tbody {
                    tr { td { "|A|" } td { "{totals.a}" } }
                    tr { td { "|B|" } td { "{totals.b}" } }
                    tr { td { "|A ∪ B|" } td { "{totals.union}" } }
                    tr { td { "|U|" } td { "{totals.universe}" } }
                }
            }
        }
    }
}

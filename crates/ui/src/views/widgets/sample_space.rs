use aula_core::model::ExerciseResponse;
use aula_core::sample_space::{CoinSide, CoinSlots, DiceOutcome, DiceSelection};
use dioxus::prelude::*;
use serde_json::Value;

use crate::views::lesson::ExerciseContext;

/// A coin picked up and waiting for a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Held {
    Tray(CoinSide),
    Slot(usize, usize),
}

/// Click on `target`; returns what stays in hand.
fn click_slot(slots: &mut CoinSlots, held: Option<Held>, target: (usize, usize)) -> Option<Held> {
    match held {
        Some(Held::Tray(side)) => {
            slots.place(target.0, target.1, side);
            None
        }
        Some(Held::Slot(card, slot)) if (card, slot) != target => {
            slots.relocate((card, slot), target);
            None
        }
        Some(Held::Slot(..)) => None,
        None => {
            let filled = slots
                .cards()
                .get(target.0)
                .and_then(|card| card.get(target.1))
                .is_some_and(Option::is_some);
            filled.then_some(Held::Slot(target.0, target.1))
        }
    }
}

/// Build the outcomes of two coin tosses on four cards.
#[component]
pub fn CoinSampleSpace() -> Element {
    let ctx = use_context::<ExerciseContext>();
    let mut slots = use_signal(CoinSlots::default);
    let mut held = use_signal(|| None::<Held>);

    let on_slot = use_callback(move |target: (usize, usize)| {
        let next = click_slot(&mut slots.write(), held(), target);
        held.set(next);
        if let Some(sequences) = slots.read().response() {
            ctx.set_response(ExerciseResponse::CoinSampleSpace(sequences));
        }
    });

    let cards = slots.read().cards().to_vec();
    let total = cards.len();
    let completed = slots.read().completed();

    rsx! {
        div { class: "coin-space",
            div { class: "tray",
                for side in CoinSide::BOTH {
                    button {
                        key: "{side}",
                        r#type: "button",
                        class: if held() == Some(Held::Tray(side)) { "chip chip--selected" } else { "chip" },
                        onclick: move |_| held.set(Some(Held::Tray(side))),
                        "{side}"
                    }
                }
            }
            div { class: "coin-cards",
                for (card, coins) in cards.into_iter().enumerate() {
                    div { key: "{card}", class: "coin-card",
                        for (slot, coin) in coins.into_iter().enumerate() {
                            button {
                                key: "{slot}",
                                r#type: "button",
                                class: if held() == Some(Held::Slot(card, slot)) { "cell cell--selected" } else { "cell" },
                                onclick: move |_| on_slot.call((card, slot)),
                                match coin {
                                    Some(side) => rsx! { "{side}" },
                                    None => rsx! { "·" },
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "link",
                            onclick: move |_| slots.write().clear_card(card),
                            "Limpiar"
                        }
                    }
                }
            }
            div { class: "coin-status",
                span { "Completadas: {completed}/{total}" }
                button {
                    r#type: "button",
                    onclick: move |_| {
                        slots.write().clear_all();
                        held.set(None);
                    },
                    "Limpiar todo"
                }
            }
        }
    }
}

/// 6x6 grid of ordered dice pairs; click cells to mark an event.
#[component]
pub fn DiceSampleSpace(config: Value) -> Element {
    let ctx = use_context::<ExerciseContext>();
    let initial_sums = config
        .get("showSums")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let mut show_sums = use_signal(|| initial_sums);
    let mut selection = use_signal(DiceSelection::new);

    let publish = move || {
        ctx.set_response(ExerciseResponse::DiceSampleSpace(selection.read().keys()));
    };
    let on_cell = use_callback(move |outcome: DiceOutcome| {
        selection.write().toggle(outcome);
        publish();
    });

    let rows = (1..=DiceOutcome::FACES)
        .map(|first| {
            (1..=DiceOutcome::FACES)
                .filter_map(|second| DiceOutcome::new(first, second))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let count = selection.read().len();

    rsx! {
        div { class: "dice-space",
            div { class: "dice-controls",
                label {
                    input {
                        r#type: "checkbox",
                        checked: show_sums(),
                        onchange: move |evt| show_sums.set(evt.checked()),
                    }
                    "Mostrar sumas"
                }
                span { "Seleccionadas: {count}" }
                button {
                    r#type: "button",
                    onclick: move |_| {
                        selection.write().clear();
                        publish();
                    },
                    "Limpiar"
                }
            }
            table { class: "dice-grid",
                tbody {
                    for (index, row) in rows.into_iter().enumerate() {
                        tr { key: "{index}",
                            for outcome in row {
                                td {
                                    key: "{outcome}",
                                    class: if selection.read().contains(outcome) { "cell cell--selected" } else { "cell" },
                                    onclick: move |_| on_cell.call(outcome),
                                    "({outcome.first},{outcome.second})"
                                    if show_sums() {
                                        span { class: "dice-sum", " {outcome.sum()}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

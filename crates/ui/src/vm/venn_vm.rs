use std::collections::BTreeMap;

use aula_core::venn::{Region, VennConfig};

/// Notation and explanation for a combination of selected regions.
///
/// Both strings use the inline markup understood by [`crate::vm::tokenize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionInfo {
    pub key: &'static str,
    pub notation: &'static str,
    pub explanation: &'static str,
}

/// Name the set a selection of regions forms. Unnamed combinations read as
/// the empty set.
#[must_use]
pub fn combine_regions(selected: &[Region]) -> &'static str {
    let has = |region| selected.contains(&region);
    let outside = has(Region::Outside);
    let only_a = has(Region::OnlyA);
    let only_b = has(Region::OnlyB);
    let both = has(Region::Intersection);
    match (outside, only_a, only_b, both) {
        (false, false, false, false) => "empty",
        (true, true, true, true) => "U",
        (false, true, true, true) => "AuB",
        (false, true, false, true) => "A",
        (false, false, true, true) => "B",
        (true, true, false, false) => "B'",
        (true, false, true, false) => "A'",
        (true, false, false, false) => Region::Outside.id(),
        (false, true, false, false) => Region::OnlyA.id(),
        (false, false, true, false) => Region::OnlyB.id(),
        (false, false, false, true) => Region::Intersection.id(),
        _ => "empty",
    }
}

#[must_use]
pub fn region_info(selected: &[Region]) -> RegionInfo {
    let key = combine_regions(selected);
    REGION_INFO
        .iter()
        .copied()
        .find(|info| info.key == key)
        .unwrap_or(EMPTY_INFO)
}

const EMPTY_INFO: RegionInfo = RegionInfo {
    key: "empty",
    notation: r"\varnothing",
    explanation: r"En teoría de conjuntos, $\varnothing$ es el **conjunto vacío**: no contiene elementos. En la encuesta, aparecería si ninguna persona cumple cierta condición.",
};

const REGION_INFO: [RegionInfo; 10] = [
    RegionInfo {
        key: "AuB",
        notation: r"A \cup B = \{ x \mid x \in A \text{ o } x \in B \}",
        explanation: r"La **unión** de dos conjuntos incluye a todos los elementos que están en $A$, en $B$ o en ambos. En la encuesta, $A$ representa a quienes practican atletismo y $B$ a quienes practican baloncesto; entonces $A \cup B$ contiene a todas las personas que practican **atletismo o baloncesto (o ambos)**. Gráficamente, corresponde a las dos circunferencias completas del diagrama, excluyendo solo la región exterior.",
    },
    RegionInfo {
        key: "AiB",
        notation: r"A \cap B = \{ x \mid x \in A \text{ y } x \in B \}",
        explanation: r"La **intersección** reúne únicamente los elementos que pertenecen simultáneamente a $A$ y a $B$. En la encuesta, $A \cap B$ son las personas que practican **tanto atletismo como baloncesto**. En el diagrama de Venn, es la región de superposición entre los dos círculos.",
    },
    RegionInfo {
        key: "A",
        notation: "A",
        explanation: r"En la encuesta, $A$ es el conjunto de personas que practican **atletismo** (incluye tanto quienes también practican baloncesto como quienes no).",
    },
    RegionInfo {
        key: "B",
        notation: "B",
        explanation: r"En la encuesta, $B$ reúne a las personas que practican **baloncesto** (incluye tanto quienes también practican atletismo como quienes no).",
    },
    RegionInfo {
        key: "U",
        notation: "U",
        explanation: r"En teoría de conjuntos, $U$ denota el **universo**: el conjunto de todos los elementos bajo estudio. En la encuesta, $U$ corresponde a todas las personas encuestadas. En un diagrama de Venn, se dibuja como el rectángulo que contiene los círculos.",
    },
    RegionInfo {
        key: "AdB",
        notation: r"A \setminus B = \{ x \mid x \in A \text{ y } x \notin B \}",
        explanation: r"La **diferencia** $A \setminus B$ es el conjunto de elementos que están en $A$ y **no** están en $B$. En la encuesta, representa a las personas que practican **solo atletismo**.",
    },
    RegionInfo {
        key: "BdA",
        notation: r"B \setminus A = \{ x \mid x \in B \text{ y } x \notin A \}",
        explanation: r"$B \setminus A$ contiene los elementos que están en $B$ y **no** están en $A$. En la encuesta, son las personas que practican **solo baloncesto**.",
    },
    RegionInfo {
        key: "A'",
        notation: r"A' = U \setminus A = \{ x \mid x \notin A \}",
        explanation: r"El **complemento** de $A$ (en $U$) es el conjunto de todos los elementos que **no** pertenecen a $A$. En la encuesta, $A'$ incluye a quienes practican solo baloncesto o a quienes no practican ninguno de los dos deportes.",
    },
    RegionInfo {
        key: "B'",
        notation: r"B' = U \setminus B = \{ x \mid x \notin B \}",
        explanation: r"El **complemento** de $B$ (en $U$) es el conjunto de elementos que **no** están en $B$. En la encuesta, $B'$ incluye a quienes practican solo atletismo o a quienes no practican ninguno de los dos deportes.",
    },
    RegionInfo {
        key: "(AuB)'",
        notation: r"(A \cup B)'",
        explanation: r"El **complemento de la unión** $(A \cup B)'$ está formado por los elementos que no pertenecen ni a $A$ ni a $B$. Por las leyes de De Morgan: $(A \cup B)' = A' \cap B'$. En la encuesta, representa a las personas que **no practican ni atletismo ni baloncesto**.",
    },
];

/// Add or remove `region` from the selection.
pub fn toggle_region(selected: &mut Vec<Region>, region: Region) {
    if let Some(pos) = selected.iter().position(|r| *r == region) {
        selected.remove(pos);
    } else {
        selected.push(region);
    }
}

/// Anchor point for labels and inputs inside each region.
#[must_use]
pub fn label_anchor(config: &VennConfig, region: Region) -> (f64, f64) {
    let (cx_a, cy) = config.circle_a();
    let (cx_b, _) = config.circle_b();
    match region {
        Region::Outside => (64.0, 32.0),
        Region::OnlyA => (cx_a - config.radius * 0.45, cy),
        Region::OnlyB => (cx_b + config.radius * 0.45, cy),
        Region::Intersection => (config.width / 2.0, cy),
    }
}

/// Derived totals under the cardinality diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardinalityTotals {
    pub a: u64,
    pub b: u64,
    pub union: u64,
    pub universe: u64,
}

/// Non-numeric entries count as zero.
#[must_use]
pub fn cardinality_totals(counts: &BTreeMap<String, String>) -> CardinalityTotals {
    let count = |region: Region| {
        counts
            .get(region.id())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let only_a = count(Region::OnlyA);
    let only_b = count(Region::OnlyB);
    let both = count(Region::Intersection);
    let union = only_a + only_b + both;
    CardinalityTotals {
        a: only_a + both,
        b: only_b + both,
        union,
        universe: union + count(Region::Outside),
    }
}

/// Names per region; regions without names are left out.
#[must_use]
pub fn placement_bins(placements: &BTreeMap<String, Region>) -> BTreeMap<String, Vec<String>> {
    let mut bins: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, region) in placements {
        bins.entry(region.id().to_string())
            .or_default()
            .push(name.clone());
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_name_their_set() {
        assert_eq!(combine_regions(&[Region::Intersection]), "AiB");
        assert_eq!(
            combine_regions(&[Region::Intersection, Region::OnlyA]),
            "A"
        );
        assert_eq!(
            combine_regions(&[Region::OnlyB, Region::Outside]),
            "A'"
        );
        assert_eq!(combine_regions(&Region::ALL), "U");
        assert_eq!(
            combine_regions(&[Region::OnlyA, Region::OnlyB]),
            "empty",
            "symmetric difference has no entry"
        );
    }

    #[test]
    fn every_named_combination_has_info() {
        let info = region_info(&[Region::OnlyA, Region::OnlyB, Region::Intersection]);
        assert_eq!(info.key, "AuB");
        assert!(info.explanation.contains("**unión**"));
        assert_eq!(region_info(&[]).notation, r"\varnothing");
        assert_eq!(region_info(&[Region::Outside]).key, "(AuB)'");
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut selected = vec![Region::OnlyA];
        toggle_region(&mut selected, Region::OnlyB);
        assert_eq!(selected, vec![Region::OnlyA, Region::OnlyB]);
        toggle_region(&mut selected, Region::OnlyA);
        assert_eq!(selected, vec![Region::OnlyB]);
    }

    #[test]
    fn totals_ignore_garbage() {
        let counts = BTreeMap::from([
            ("AdB".to_string(), "3".to_string()),
            ("AiB".to_string(), " 2 ".to_string()),
            ("BdA".to_string(), "x".to_string()),
            ("(AuB)'".to_string(), "4".to_string()),
        ]);
        assert_eq!(
            cardinality_totals(&counts),
            CardinalityTotals {
                a: 5,
                b: 2,
                union: 5,
                universe: 9
            }
        );
    }

    #[test]
    fn placements_group_by_region() {
        let placements = BTreeMap::from([
            ("Lucas".to_string(), Region::OnlyA),
            ("Mateo".to_string(), Region::Intersection),
            ("Luis".to_string(), Region::OnlyA),
        ]);
        let bins = placement_bins(&placements);
        assert_eq!(bins["AdB"], vec!["Lucas", "Luis"]);
        assert_eq!(bins["AiB"], vec!["Mateo"]);
        assert!(!bins.contains_key("BdA"));
    }

    #[test]
    fn anchors_sit_inside_their_region() {
        let config = VennConfig::DEFAULT;
        assert_eq!(label_anchor(&config, Region::Intersection), (250.0, 150.0));
        let (x, _) = label_anchor(&config, Region::OnlyA);
        assert!(x < 190.0);
    }
}

//! Embedded fertilizer → organic conversion rows
//!
//! Covers the straight fertilizers (Urea, DAP, MOP) and the complex grades
//! the heuristic and the trained fertilizer models emit.

/// A single embedded conversion row
pub(super) struct ConversionRow {
    pub fertilizer: &'static str,
    pub organic: &'static str,
    pub notes: &'static str,
    pub steps: &'static [&'static str],
}

// ============================================================================
// EMBEDDED CONVERSION DATA
// ============================================================================

pub(super) static EMBEDDED: &[ConversionRow] = &[
    ConversionRow {
        fertilizer: "Urea",
        organic: "Vermicompost",
        notes: "Replaces quick nitrogen with slow-release nitrogen from worm castings. \
                Apply 2-3 t/ha at land preparation and top-dress at tillering.",
        steps: &[
            "Dig a shaded pit or set up a bin about 1 m wide and 0.5 m deep",
            "Lay a 10 cm base of coarse crop residue for drainage",
            "Add alternating layers of partly decomposed cow dung and chopped green waste",
            "Introduce earthworms (Eisenia fetida) at about 1 kg per square metre",
            "Keep the bed moist (about 60%) and covered with gunny bags",
            "Harvest the dark, crumbly castings after 45-60 days and sieve before use",
        ],
    },
    ConversionRow {
        fertilizer: "DAP",
        organic: "Bone Meal",
        notes: "Supplies slow-release phosphorus with some nitrogen. \
                Works best on neutral to slightly acidic soils; mix into the root zone before sowing.",
        steps: &[
            "Collect clean animal bones and sun-dry them for a week",
            "Steam or boil the bones for 2-3 hours to remove fat and soften them",
            "Dry the bones again until brittle",
            "Crush and grind into a fine powder",
            "Sieve and store in a dry, airtight container",
            "Apply 250-500 kg/ha mixed into the soil at sowing",
        ],
    },
    ConversionRow {
        fertilizer: "MOP",
        organic: "Wood Ash",
        notes: "Rich in potassium and raises soil pH. \
                Avoid on alkaline soils and keep away from seeds at application.",
        steps: &[
            "Burn untreated hardwood or crop residue completely",
            "Let the ash cool and keep it dry",
            "Sieve out charcoal and unburnt pieces",
            "Store in a covered container so potassium is not leached by rain",
            "Broadcast 500-1000 kg/ha and work it lightly into the soil",
        ],
    },
    ConversionRow {
        fertilizer: "10-26-26",
        organic: "Bone Meal and Wood Ash Blend",
        notes: "Phosphorus and potassium heavy blend for flowering and fruiting crops.",
        steps: &[
            "Prepare bone meal and wood ash separately",
            "Mix one part bone meal with one part sieved wood ash",
            "Add two parts well-rotted compost to improve handling",
            "Store dry and apply at planting in the furrow",
        ],
    },
    ConversionRow {
        fertilizer: "14-35-14",
        organic: "Rock Phosphate Enriched Compost",
        notes: "Phosphorus-rich compost suited to acidic soils, where rock phosphate dissolves readily.",
        steps: &[
            "Build a compost heap from crop residue, green leaves and cow dung",
            "Sprinkle rock phosphate over each layer (about 12% of heap weight)",
            "Moisten each layer and cover the heap",
            "Turn the heap every 15 days",
            "Use after 90-120 days when fully decomposed",
        ],
    },
    ConversionRow {
        fertilizer: "17-17-17",
        organic: "Farmyard Manure Compost",
        notes: "Balanced nutrient supply and improved soil structure. \
                Suitable as a general maintenance dressing for most crops.",
        steps: &[
            "Collect cattle dung, urine-soaked bedding and farm waste",
            "Pile into a trench about 1 m deep and 2 m wide",
            "Fill layer by layer and plaster the top with a dung-soil slurry",
            "Leave to decompose for 4-5 months, keeping it moist",
            "Apply 10-15 t/ha two to three weeks before sowing",
        ],
    },
    ConversionRow {
        fertilizer: "20-20",
        organic: "Poultry Manure Compost",
        notes: "Provides nitrogen and phosphorus in roughly equal amounts. \
                Always compost before use to avoid burning roots.",
        steps: &[
            "Collect poultry litter and mix with dry straw or sawdust",
            "Moisten and pile the mixture under shade",
            "Turn the pile weekly to keep it aerobic",
            "Use after 6-8 weeks once it no longer smells of ammonia",
            "Apply 2-5 t/ha before sowing",
        ],
    },
    ConversionRow {
        fertilizer: "28-28",
        organic: "Neem Cake and Bone Meal Mix",
        notes: "Concentrated nitrogen and phosphorus. \
                Neem cake also slows nitrogen loss and deters soil pests.",
        steps: &[
            "Soak neem cake in water overnight and drain",
            "Mix with an equal weight of bone meal",
            "Blend in well-rotted compost to bulk it up",
            "Apply in the root zone at sowing and again at early growth",
        ],
    },
];

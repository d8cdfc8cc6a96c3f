// Static artwork catalog and the per-artwork content dispatch.
//
// Records are immutable and loaded once; `id` is the routing and lookup key.
// The 3D view decides what to build from a `ContentPlan`, resolved exactly
// once per artwork so the builder switch is exhaustive instead of a string
// fallthrough at every use-site.

use fnv::FnvHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtworkRecord {
    pub id: u32,
    pub title: &'static str,
    pub artist: &'static str,
    /// Negative years are BCE.
    pub year: i32,
    /// Open set: "painting", "sculpture", "digital", or any future tag.
    pub category: &'static str,
    pub medium: &'static str,
    pub dimensions: &'static str,
    pub description: &'static str,
    pub thumbnail_url: &'static str,
    pub image_url: &'static str,
}

macro_rules! artwork {
    ($id:expr, $title:expr, $artist:expr, $year:expr, $category:expr, $medium:expr, $dims:expr, $desc:expr, $thumb:expr, $image:expr) => {
        ArtworkRecord {
            id: $id,
            title: $title,
            artist: $artist,
            year: $year,
            category: $category,
            medium: $medium,
            dimensions: $dims,
            description: $desc,
            thumbnail_url: $thumb,
            image_url: $image,
        }
    };
}

pub static ARTWORKS: &[ArtworkRecord] = &[
    artwork!(
        1,
        "Starry Night",
        "Vincent van Gogh",
        1889,
        "painting",
        "Oil on canvas",
        "73.7 cm \u{d7} 92.1 cm",
        "Painted in June 1889, it depicts the view from the east-facing window of the artist's asylum room at Saint-R\u{e9}my-de-Provence, just before sunrise.",
        "./1.jpg",
        "/1.jpg"
    ),
    artwork!(
        2,
        "The Persistence of Memory",
        "Salvador Dal\u{ed}",
        1931,
        "painting",
        "Oil on canvas",
        "24 cm \u{d7} 33 cm",
        "One of the most recognizable works of Surrealism, in the collection of the Museum of Modern Art since 1934.",
        "./2.jpg",
        "/2.jpg"
    ),
    artwork!(
        3,
        "The Thinker",
        "Auguste Rodin",
        1904,
        "sculpture",
        "Bronze",
        "Height: 180 cm",
        "A nude male figure of heroic size sitting on a rock with his chin resting on one hand as though deep in thought.",
        "./3.webp",
        "/3.webp"
    ),
    artwork!(
        4,
        "Digital Disruption",
        "Alex Chen",
        2022,
        "digital",
        "Digital Art",
        "4K Resolution",
        "A contemporary piece exploring the intersection of technology and human consciousness through vibrant colors and abstract forms.",
        "./4.jpg",
        "/4.jpg"
    ),
    artwork!(
        5,
        "Guernica",
        "Pablo Picasso",
        1937,
        "painting",
        "Oil on canvas",
        "349.3 cm \u{d7} 776.6 cm",
        "A large 1937 oil painting regarded by many critics as the most moving and powerful anti-war painting in history.",
        "./5.jpg",
        "/5.jpg"
    ),
    artwork!(
        6,
        "David",
        "Michelangelo",
        1504,
        "sculpture",
        "Marble",
        "Height: 517 cm",
        "A masterpiece of Renaissance sculpture created between 1501 and 1504, a 5.17-metre marble statue of a standing male nude.",
        "./6.jpg",
        "/6.jpg"
    ),
    artwork!(
        7,
        "Neon Dreams",
        "Sarah Johnson",
        2023,
        "digital",
        "Digital Art",
        "8K Resolution",
        "An immersive digital landscape of a futuristic cityscape bathed in neon lights and holographic projections.",
        "./7.jpg",
        "/7.jpg"
    ),
    artwork!(
        8,
        "Girl with a Pearl Earring",
        "Johannes Vermeer",
        1665,
        "painting",
        "Oil on canvas",
        "44.5 cm \u{d7} 39 cm",
        "An oil painting by Dutch Golden Age painter Johannes Vermeer, dated c. 1665, his most famous work of art.",
        "./8.jpg",
        "/8.jpg"
    ),
    artwork!(
        9,
        "Venus de Milo",
        "Alexandros of Antioch",
        -120,
        "sculpture",
        "Marble",
        "Height: 203 cm",
        "An ancient Greek statue created sometime between 130 and 100 BC, believed to depict Aphrodite.",
        "./9.jpg",
        "/9.jpg"
    ),
    artwork!(
        10,
        "Quantum Resonance",
        "Mei Wong",
        2024,
        "digital",
        "Mixed Media Digital Art",
        "Virtual Reality Environment",
        "A virtual reality piece that lets viewers interact with quantum particles in an immersive audiovisual experience.",
        "./10.jpg",
        "/10.jpg"
    ),
    artwork!(
        11,
        "The Night Watch",
        "Rembrandt",
        1642,
        "painting",
        "Oil on canvas",
        "363 cm \u{d7} 437 cm",
        "A 1642 painting by Rembrandt van Rijn, one of the most famous Dutch Golden Age paintings.",
        "./11.webp",
        "/11.webp"
    ),
    artwork!(
        12,
        "Bust of R\u{f3}\u{17c}a Loewenfeld",
        "Auguste Rodin",
        1881,
        "sculpture",
        "Marble",
        "Height: 115.6 cm",
        "A delicate and expressive portrait bust from 1881, showcasing Rodin's ability to bring marble to life.",
        "./12.jpg",
        "/12.jpg"
    ),
];

/// Read-only catalog with an id-keyed index for route lookups.
pub struct Catalog {
    records: &'static [ArtworkRecord],
    by_id: FnvHashMap<u32, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        let mut by_id = FnvHashMap::default();
        for (i, art) in ARTWORKS.iter().enumerate() {
            let prev = by_id.insert(art.id, i);
            debug_assert!(prev.is_none(), "duplicate artwork id {}", art.id);
        }
        Self {
            records: ARTWORKS,
            by_id,
        }
    }

    pub fn records(&self) -> &'static [ArtworkRecord] {
        self.records
    }

    pub fn get(&self, id: u32) -> Option<&'static ArtworkRecord> {
        self.by_id.get(&id).map(|&i| &self.records[i])
    }

    /// Other works in the same category, catalog order, excluding `id`.
    pub fn related(&self, id: u32, limit: usize) -> Vec<&'static ArtworkRecord> {
        let Some(art) = self.get(id) else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter(|other| other.id != id && other.category == art.category)
            .take(limit)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// External 3D models for a subset of sculpture ids.
#[derive(Clone)]
pub struct ModelRegistry {
    by_id: FnvHashMap<u32, &'static str>,
}

const MODEL_PATHS: &[(u32, &str)] = &[
    (3, "/models/the_thinker.glb"),
    (6, "/models/david.glb"),
    (9, "/models/venus_de_milo.glb"),
];

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            by_id: MODEL_PATHS.iter().copied().collect(),
        }
    }

    pub fn model_url(&self, id: u32) -> Option<&'static str> {
        self.by_id.get(&id).copied()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// What the scene builds for one artwork, resolved once from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPlan {
    /// Textured plane with an enclosing frame.
    Painting { image_url: &'static str },
    /// Binary glTF fetched by URL, scale-normalized on arrival.
    LoadedModel { model_url: &'static str },
    /// Procedural stand-in solid; the 2D image is applied if it loads.
    Placeholder { image_url: &'static str },
}

impl ContentPlan {
    pub fn resolve(art: &ArtworkRecord, models: &ModelRegistry) -> Self {
        match art.category {
            "painting" => ContentPlan::Painting {
                image_url: art.image_url,
            },
            "sculpture" => match models.model_url(art.id) {
                Some(model_url) => ContentPlan::LoadedModel { model_url },
                None => ContentPlan::Placeholder {
                    image_url: art.image_url,
                },
            },
            // Every other category, known or future, gets the stand-in.
            _ => ContentPlan::Placeholder {
                image_url: art.image_url,
            },
        }
    }
}

/// Parse a detail-page route of the form `#/artwork/<id>`.
pub fn parse_artwork_hash(hash: &str) -> Option<u32> {
    let rest = hash.strip_prefix('#')?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let id = rest.strip_prefix("artwork/")?;
    id.parse().ok()
}

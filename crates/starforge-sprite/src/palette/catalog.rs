//! The palette catalog. Ramps run from low to high intensity, or from shallow
//! to deep for depth-ordered classes.

use super::{PaletteSet, Rgb};
use crate::body::BodyKind;

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

const STAR_CORONA_BLUE: &[Rgb] = &[
    [40, 60, 140],
    [70, 100, 200],
    [120, 150, 240],
    [180, 200, 255],
    [230, 238, 255],
];
const STAR_CORONA_WHITE: &[Rgb] = &[
    [90, 90, 120],
    [150, 150, 180],
    [200, 200, 220],
    [235, 235, 245],
    [255, 255, 255],
];
const STAR_CORONA_YELLOW: &[Rgb] = &[
    [120, 60, 10],
    [190, 110, 30],
    [240, 170, 60],
    [255, 215, 120],
    [255, 245, 200],
];
const STAR_CORONA_ORANGE: &[Rgb] = &[
    [110, 40, 10],
    [180, 80, 20],
    [230, 130, 40],
    [255, 180, 90],
    [255, 220, 160],
];
const STAR_CORONA_RED: &[Rgb] = &[
    [80, 15, 10],
    [140, 35, 20],
    [200, 70, 35],
    [240, 120, 70],
    [255, 175, 130],
];

const STAR_FLARE_BLUE: &[Rgb] = &[[200, 220, 255], [225, 235, 255], [245, 250, 255], [255, 255, 255]];
const STAR_FLARE_WARM: &[Rgb] = &[[255, 230, 170], [255, 240, 200], [255, 250, 230], [255, 255, 255]];
const STAR_FLARE_RED: &[Rgb] = &[[255, 170, 120], [255, 200, 160], [255, 230, 210], [255, 250, 245]];

pub(super) static STARS: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::Star,
        &["g"],
        &[
            (
                "photosphere",
                &[
                    [255, 252, 230],
                    [255, 240, 190],
                    [255, 222, 140],
                    [250, 196, 90],
                    [235, 160, 55],
                    [205, 120, 35],
                ],
            ),
            ("spot", &[[170, 100, 40], [120, 65, 25], [80, 40, 15], [45, 22, 8]]),
            ("flare", STAR_FLARE_WARM),
            ("corona", STAR_CORONA_YELLOW),
        ],
    ),
    PaletteSet::new(
        BodyKind::Star,
        &["o", "b"],
        &[
            (
                "photosphere",
                &[
                    [245, 250, 255],
                    [215, 230, 255],
                    [180, 205, 255],
                    [150, 180, 250],
                    [115, 150, 235],
                    [85, 115, 210],
                ],
            ),
            ("spot", &[[90, 110, 170], [65, 80, 135], [40, 50, 95], [20, 25, 55]]),
            ("flare", STAR_FLARE_BLUE),
            ("corona", STAR_CORONA_BLUE),
        ],
    ),
    PaletteSet::new(
        BodyKind::Star,
        &["a", "f"],
        &[
            (
                "photosphere",
                &[
                    [255, 255, 255],
                    [248, 248, 255],
                    [238, 238, 248],
                    [222, 222, 238],
                    [200, 200, 222],
                    [172, 172, 200],
                ],
            ),
            ("spot", &[[140, 135, 150], [100, 96, 112], [66, 62, 76], [36, 34, 44]]),
            ("flare", STAR_FLARE_WARM),
            ("corona", STAR_CORONA_WHITE),
        ],
    ),
    PaletteSet::new(
        BodyKind::Star,
        &["k"],
        &[
            (
                "photosphere",
                &[
                    [255, 236, 200],
                    [255, 210, 150],
                    [250, 180, 100],
                    [238, 148, 65],
                    [215, 115, 40],
                    [180, 85, 25],
                ],
            ),
            ("spot", &[[150, 70, 25], [105, 48, 18], [70, 30, 10], [38, 16, 6]]),
            ("flare", STAR_FLARE_WARM),
            ("corona", STAR_CORONA_ORANGE),
        ],
    ),
    PaletteSet::new(
        BodyKind::Star,
        &["m"],
        &[
            (
                "photosphere",
                &[
                    [255, 200, 160],
                    [250, 160, 115],
                    [235, 125, 80],
                    [210, 95, 55],
                    [180, 70, 40],
                    [145, 48, 28],
                ],
            ),
            ("spot", &[[120, 40, 20], [85, 28, 14], [55, 18, 9], [30, 10, 5]]),
            ("flare", STAR_FLARE_RED),
            ("corona", STAR_CORONA_RED),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Rocky planets
// ---------------------------------------------------------------------------

const WATER_DEEP: &[Rgb] = &[[28, 70, 140], [22, 56, 118], [16, 42, 96], [10, 30, 74]];
const WATER_SHALLOW: &[Rgb] = &[[90, 170, 200], [70, 146, 190], [50, 120, 175], [36, 92, 158]];
const CLOUD_WHITE: &[Rgb] = &[[200, 205, 212], [222, 226, 232], [240, 242, 246], [252, 252, 255]];
const ICE: &[Rgb] = &[[205, 220, 235], [225, 235, 245], [240, 246, 252], [255, 255, 255]];
const CITY: &[Rgb] = &[[200, 140, 60], [235, 180, 90], [255, 215, 130], [255, 240, 190]];
const LAVA: &[Rgb] = &[[120, 20, 5], [190, 50, 10], [240, 100, 20], [255, 170, 50], [255, 230, 120]];
const ROCKY_CRATER: &[Rgb] = &[[120, 110, 95], [100, 90, 78], [80, 72, 62], [60, 54, 46]];

pub(super) static ROCKY_PLANETS: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::RockyPlanet,
        &["terran"],
        &[
            ("deep_water", WATER_DEEP),
            ("shallow_water", WATER_SHALLOW),
            (
                "biome",
                &[
                    [214, 200, 140],
                    [110, 170, 70],
                    [70, 140, 50],
                    [45, 110, 40],
                    [100, 110, 60],
                    [130, 115, 85],
                ],
            ),
            ("mountain", &[[120, 105, 85], [140, 125, 105], [165, 152, 135], [200, 195, 190]]),
            ("ice", ICE),
            ("cloud", CLOUD_WHITE),
            ("city", CITY),
            ("lava", LAVA),
            ("crater", ROCKY_CRATER),
            ("atmosphere", &[[60, 110, 200], [90, 150, 235], [130, 185, 255], [180, 215, 255]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::RockyPlanet,
        &["desert"],
        &[
            ("deep_water", &[[40, 80, 110], [32, 66, 94], [24, 52, 78], [18, 40, 62]]),
            ("shallow_water", &[[120, 165, 160], [98, 145, 148], [78, 126, 136], [60, 106, 122]]),
            (
                "biome",
                &[
                    [240, 210, 150],
                    [225, 185, 120],
                    [210, 160, 95],
                    [190, 135, 75],
                    [165, 110, 60],
                    [140, 90, 50],
                ],
            ),
            ("mountain", &[[150, 100, 60], [170, 120, 78], [190, 145, 100], [215, 180, 140]]),
            ("ice", &[[220, 215, 205], [235, 230, 222], [245, 242, 236], [255, 252, 248]]),
            ("cloud", &[[210, 190, 160], [225, 208, 180], [238, 225, 200], [250, 240, 222]]),
            ("city", CITY),
            ("lava", LAVA),
            ("crater", &[[170, 120, 80], [145, 100, 65], [120, 82, 52], [95, 64, 40]]),
            ("atmosphere", &[[200, 150, 90], [225, 175, 110], [245, 200, 140], [255, 225, 180]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::RockyPlanet,
        &["arctic"],
        &[
            ("deep_water", &[[30, 60, 110], [24, 48, 92], [18, 38, 76], [12, 28, 60]]),
            ("shallow_water", &[[120, 170, 200], [100, 150, 188], [80, 130, 175], [62, 110, 160]]),
            (
                "biome",
                &[
                    [170, 180, 170],
                    [140, 160, 150],
                    [110, 135, 125],
                    [150, 165, 175],
                    [190, 200, 210],
                    [220, 228, 236],
                ],
            ),
            ("mountain", &[[130, 135, 145], [155, 160, 170], [185, 190, 200], [225, 230, 238]]),
            ("ice", ICE),
            ("cloud", CLOUD_WHITE),
            ("city", CITY),
            ("lava", LAVA),
            ("crater", &[[140, 145, 150], [118, 122, 128], [96, 100, 106], [76, 80, 86]]),
            ("atmosphere", &[[140, 180, 220], [165, 200, 235], [195, 220, 245], [225, 238, 255]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::RockyPlanet,
        &["volcanic"],
        &[
            ("deep_water", &[[150, 40, 10], [120, 30, 8], [90, 22, 6], [60, 15, 4]]),
            ("shallow_water", &[[255, 160, 50], [240, 120, 30], [210, 85, 20], [180, 60, 12]]),
            (
                "biome",
                &[
                    [70, 60, 55],
                    [60, 50, 46],
                    [50, 42, 38],
                    [42, 35, 32],
                    [55, 45, 40],
                    [75, 62, 55],
                ],
            ),
            ("mountain", &[[60, 50, 45], [80, 68, 60], [100, 86, 76], [125, 110, 98]]),
            ("ice", &[[150, 150, 150], [170, 170, 170], [190, 190, 190], [210, 210, 210]]),
            ("cloud", &[[90, 85, 80], [110, 104, 98], [130, 124, 118], [150, 144, 138]]),
            ("city", CITY),
            ("lava", LAVA),
            ("crater", &[[55, 46, 40], [45, 38, 33], [36, 30, 26], [28, 23, 20]]),
            ("atmosphere", &[[160, 70, 30], [190, 95, 45], [215, 125, 65], [235, 160, 100]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::RockyPlanet,
        &["ocean"],
        &[
            ("deep_water", &[[24, 64, 150], [18, 50, 128], [12, 38, 106], [8, 26, 84]]),
            ("shallow_water", &[[80, 190, 210], [60, 165, 200], [44, 138, 188], [32, 110, 172]]),
            (
                "biome",
                &[
                    [225, 215, 160],
                    [120, 190, 90],
                    [80, 160, 70],
                    [50, 130, 55],
                    [90, 120, 70],
                    [120, 120, 95],
                ],
            ),
            ("mountain", &[[115, 110, 95], [138, 132, 116], [165, 160, 145], [205, 205, 200]]),
            ("ice", ICE),
            ("cloud", CLOUD_WHITE),
            ("city", CITY),
            ("lava", LAVA),
            ("crater", ROCKY_CRATER),
            ("atmosphere", &[[50, 120, 220], [80, 155, 240], [120, 190, 255], [170, 220, 255]]),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Gas giants
// ---------------------------------------------------------------------------

const LIGHTNING: &[Rgb] = &[[170, 180, 255], [200, 210, 255], [230, 235, 255], [255, 255, 255]];

pub(super) static GAS_GIANTS: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::GasGiant,
        &["jovian"],
        &[
            ("band_light", &[[215, 190, 150], [228, 205, 168], [238, 220, 188], [246, 234, 210], [252, 245, 230]]),
            ("band_dark", &[[175, 120, 80], [160, 105, 68], [145, 92, 58], [128, 80, 50], [110, 68, 42]]),
            ("storm", &[[230, 225, 215], [240, 236, 228], [248, 246, 240], [255, 255, 252]]),
            ("spot", &[[190, 110, 80], [200, 95, 60], [185, 75, 45], [165, 60, 35]]),
            ("polar", &[[120, 110, 100], [135, 124, 112], [150, 138, 124], [165, 152, 138]]),
            ("lightning", LIGHTNING),
            ("ring", &[[150, 140, 120], [170, 160, 140], [190, 180, 160], [210, 200, 182]]),
            ("atmosphere", &[[200, 170, 130], [220, 190, 150], [235, 210, 175], [248, 230, 200]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::GasGiant,
        &["saturnian"],
        &[
            ("band_light", &[[225, 205, 160], [234, 216, 175], [242, 226, 190], [248, 236, 205], [252, 244, 222]]),
            ("band_dark", &[[195, 160, 110], [182, 148, 100], [170, 136, 90], [156, 124, 82], [140, 110, 72]]),
            ("storm", &[[238, 232, 215], [244, 240, 226], [250, 247, 238], [255, 255, 250]]),
            ("spot", &[[210, 180, 130], [200, 165, 112], [188, 150, 98], [175, 135, 86]]),
            ("polar", &[[110, 130, 150], [125, 145, 162], [140, 158, 172], [156, 172, 184]]),
            ("lightning", LIGHTNING),
            (
                "ring",
                &[
                    [130, 115, 90],
                    [165, 150, 120],
                    [200, 185, 150],
                    [220, 205, 170],
                    [190, 175, 140],
                    [150, 135, 108],
                ],
            ),
            ("atmosphere", &[[215, 190, 140], [230, 208, 160], [242, 224, 182], [252, 240, 208]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::GasGiant,
        &["ice"],
        &[
            ("band_light", &[[150, 200, 230], [165, 212, 238], [180, 222, 244], [196, 232, 250], [214, 240, 255]]),
            ("band_dark", &[[80, 140, 200], [70, 126, 188], [60, 112, 176], [50, 98, 162], [42, 84, 148]]),
            ("storm", &[[220, 240, 255], [232, 246, 255], [244, 250, 255], [255, 255, 255]]),
            ("spot", &[[40, 70, 140], [32, 58, 124], [26, 46, 108], [20, 36, 92]]),
            ("polar", &[[110, 160, 210], [124, 172, 218], [138, 184, 226], [152, 196, 234]]),
            ("lightning", LIGHTNING),
            ("ring", &[[110, 130, 150], [130, 150, 170], [150, 170, 190], [170, 190, 210]]),
            ("atmosphere", &[[120, 190, 240], [145, 205, 248], [170, 220, 252], [200, 235, 255]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::GasGiant,
        &["hot"],
        &[
            ("band_light", &[[240, 150, 90], [246, 168, 105], [250, 186, 122], [253, 204, 142], [255, 222, 165]]),
            ("band_dark", &[[160, 50, 30], [145, 42, 26], [128, 35, 22], [110, 28, 18], [92, 22, 14]]),
            ("storm", &[[255, 210, 150], [255, 224, 175], [255, 238, 200], [255, 250, 230]]),
            ("spot", &[[90, 20, 15], [75, 16, 12], [60, 12, 10], [45, 9, 8]]),
            ("polar", &[[120, 40, 30], [135, 48, 34], [150, 56, 40], [165, 66, 46]]),
            ("lightning", &[[255, 220, 170], [255, 232, 196], [255, 244, 222], [255, 255, 245]]),
            ("ring", &[[120, 80, 60], [140, 96, 72], [160, 112, 86], [180, 128, 100]]),
            ("atmosphere", &[[255, 120, 60], [255, 145, 80], [255, 170, 105], [255, 200, 140]]),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Moons
// ---------------------------------------------------------------------------

pub(super) static MOONS: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::Moon,
        &["rocky"],
        &[
            (
                "regolith",
                &[
                    [92, 90, 86],
                    [106, 104, 100],
                    [120, 118, 113],
                    [134, 132, 127],
                    [148, 146, 141],
                    [162, 160, 155],
                    [176, 174, 169],
                    [190, 188, 183],
                ],
            ),
            ("highland", &[[170, 168, 162], [185, 183, 177], [200, 198, 192], [215, 213, 208], [230, 228, 224]]),
            ("maria", &[[96, 94, 92], [82, 80, 79], [70, 68, 67], [58, 57, 56], [48, 47, 46]]),
            ("crater", &[[110, 108, 104], [92, 90, 87], [76, 74, 72], [62, 60, 58], [48, 47, 45], [36, 35, 34]]),
            ("ejecta", &[[200, 198, 194], [215, 213, 210], [230, 229, 226], [245, 244, 242]]),
            ("rille", &[[90, 88, 85], [74, 72, 70], [58, 56, 55]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::Moon,
        &["icy"],
        &[
            (
                "regolith",
                &[
                    [150, 165, 180],
                    [162, 176, 190],
                    [174, 187, 200],
                    [186, 198, 210],
                    [198, 209, 220],
                    [210, 220, 229],
                    [222, 231, 238],
                    [234, 241, 247],
                ],
            ),
            ("highland", &[[215, 225, 235], [225, 233, 241], [235, 241, 247], [245, 249, 252], [255, 255, 255]]),
            ("maria", &[[130, 150, 170], [115, 136, 158], [100, 122, 146], [86, 108, 134], [72, 94, 122]]),
            ("crater", &[[160, 175, 190], [140, 157, 174], [122, 140, 160], [104, 124, 146], [88, 108, 132], [72, 92, 118]]),
            ("ejecta", &[[235, 242, 250], [242, 247, 252], [248, 251, 254], [255, 255, 255]]),
            ("rille", &[[120, 90, 70], [100, 72, 56], [80, 56, 42]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::Moon,
        &["rust"],
        &[
            (
                "regolith",
                &[
                    [120, 70, 45],
                    [134, 80, 52],
                    [148, 90, 59],
                    [162, 100, 66],
                    [176, 110, 73],
                    [188, 122, 82],
                    [200, 134, 92],
                    [212, 146, 104],
                ],
            ),
            ("highland", &[[190, 130, 95], [202, 145, 110], [214, 160, 126], [226, 176, 142], [238, 192, 160]]),
            ("maria", &[[100, 58, 40], [88, 50, 34], [76, 43, 29], [64, 36, 24], [52, 29, 20]]),
            ("crater", &[[130, 78, 52], [112, 66, 44], [96, 56, 37], [80, 46, 31], [66, 38, 25], [52, 30, 20]]),
            ("ejecta", &[[220, 170, 130], [230, 186, 150], [240, 202, 170], [250, 220, 192]]),
            ("rille", &[[96, 56, 38], [80, 46, 31], [64, 36, 24]]),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Asteroids
// ---------------------------------------------------------------------------

pub(super) static ASTEROIDS: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::Asteroid,
        &["silicate"],
        &[
            ("rock", &[[90, 80, 68], [110, 98, 84], [130, 116, 100], [150, 134, 116], [170, 152, 132]]),
            ("crater", &[[95, 85, 72], [78, 70, 60], [62, 56, 48], [48, 43, 37]]),
            ("vein", &[[180, 170, 150], [200, 190, 170], [220, 210, 190]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::Asteroid,
        &["carbonaceous"],
        &[
            ("rock", &[[40, 38, 36], [52, 50, 47], [64, 61, 58], [76, 73, 69], [88, 85, 80]]),
            ("crater", &[[44, 42, 40], [36, 34, 32], [28, 27, 26], [20, 19, 18]]),
            ("vein", &[[100, 96, 90], [118, 113, 106], [136, 130, 122]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::Asteroid,
        &["metallic"],
        &[
            ("rock", &[[95, 95, 100], [115, 115, 122], [135, 135, 144], [155, 155, 165], [175, 175, 186]]),
            ("crater", &[[90, 90, 96], [74, 74, 80], [60, 60, 66], [46, 46, 52]]),
            ("vein", &[[200, 170, 110], [220, 190, 130], [240, 215, 160]]),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Black holes
// ---------------------------------------------------------------------------

const HORIZON: &[Rgb] = &[[0, 0, 0]];

pub(super) static BLACK_HOLES: &[PaletteSet] = &[
    PaletteSet::new(
        BodyKind::BlackHole,
        &["stellar"],
        &[
            ("horizon", HORIZON),
            ("lensing", &[[120, 70, 30], [190, 120, 60], [240, 190, 120], [255, 240, 210]]),
            (
                "disk",
                &[
                    [90, 20, 10],
                    [150, 45, 15],
                    [210, 90, 25],
                    [245, 150, 50],
                    [255, 205, 120],
                    [255, 245, 220],
                ],
            ),
            ("jet", &[[80, 110, 200], [120, 150, 230], [170, 195, 250], [225, 235, 255]]),
            ("glow", &[[40, 15, 10], [70, 30, 15], [100, 50, 25], [130, 75, 40]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::BlackHole,
        &["supermassive"],
        &[
            ("horizon", HORIZON),
            ("lensing", &[[110, 80, 140], [170, 130, 200], [220, 190, 240], [250, 240, 255]]),
            (
                "disk",
                &[
                    [80, 20, 40],
                    [140, 40, 60],
                    [200, 80, 70],
                    [240, 140, 90],
                    [255, 200, 150],
                    [255, 245, 230],
                ],
            ),
            ("jet", &[[90, 80, 200], [130, 120, 235], [180, 170, 250], [230, 225, 255]]),
            ("glow", &[[30, 15, 40], [55, 30, 70], [80, 45, 100], [110, 65, 130]]),
        ],
    ),
    PaletteSet::new(
        BodyKind::BlackHole,
        &["quasar"],
        &[
            ("horizon", HORIZON),
            ("lensing", &[[150, 170, 255], [190, 205, 255], [225, 232, 255], [255, 255, 255]]),
            (
                "disk",
                &[
                    [120, 40, 20],
                    [190, 90, 40],
                    [240, 160, 80],
                    [255, 220, 150],
                    [240, 240, 255],
                    [255, 255, 255],
                ],
            ),
            ("jet", &[[120, 160, 255], [160, 195, 255], [205, 225, 255], [245, 250, 255]]),
            ("glow", &[[40, 40, 80], [70, 70, 130], [100, 105, 170], [135, 140, 210]]),
        ],
    ),
];

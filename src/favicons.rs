//! Favicon and app icon generation.
//!
//! The vector logo at `assets/images/icon.svg` is rasterised at every size the site layout
//! links to, so each PNG is drawn at its own resolution rather than scaled from a bitmap.
//! Raster sources are still accepted and resized. Generation keeps going past a single failed
//! asset; [`missing_icons`] is the final check.

use anyhow::{Context, Result, anyhow};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub name: &'static str,
    pub size: u32,
    pub category: &'static str,
}

pub const ICON_SPECS: [IconSpec; 5] = [
    IconSpec { name: "favicon-32.png", size: 32, category: "Favicons" },
    IconSpec { name: "favicon-64.png", size: 64, category: "Favicons" },
    IconSpec { name: "app-icon-180.png", size: 180, category: "App Icons (iOS)" },
    IconSpec { name: "app-icon-192.png", size: 192, category: "App Icons (Android/PWA)" },
    IconSpec { name: "app-icon-512.png", size: 512, category: "App Icons (Android/PWA)" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub spec: IconSpec,
    pub path: PathBuf,
    pub bytes: u64,
}

enum IconSource {
    Vector(usvg::Tree),
    Raster(DynamicImage),
}

impl IconSource {
    fn load(source: &Path) -> Result<Self> {
        let is_svg = source
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if !is_svg {
            let image = image::open(source)
                .with_context(|| format!("Source icon not found or unreadable: {}", source.display()))?;
            return Ok(Self::Raster(image));
        }

        let data = std::fs::read(source)
            .with_context(|| format!("Source icon not found or unreadable: {}", source.display()))?;
        let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
            .with_context(|| format!("Invalid SVG: {}", source.display()))?;
        Ok(Self::Vector(tree))
    }

    fn render(&self, size: u32) -> Result<DynamicImage> {
        match self {
            Self::Raster(image) => Ok(image.resize_exact(size, size, FilterType::Lanczos3)),
            Self::Vector(tree) => rasterise(tree, size).map(DynamicImage::ImageRgba8),
        }
    }
}

/// Draws `tree` stretched onto a `size` x `size` canvas.
fn rasterise(tree: &usvg::Tree, size: u32) -> Result<RgbaImage> {
    let mut pixmap = Pixmap::new(size, size).ok_or_else(|| anyhow!("empty canvas for size {size}"))?;

    let view = tree.size();
    let transform = Transform::from_scale(size as f32 / view.width(), size as f32 / view.height());
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha, PNG wants straight alpha
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    RgbaImage::from_raw(size, size, pixels).ok_or_else(|| anyhow!("pixel buffer does not match size {size}"))
}

/// Renders `source` into every [`ICON_SPECS`] entry under `out_dir`.
///
/// Fails only when the source cannot be read or parsed; a failed asset is logged and skipped.
pub fn generate_icons(source: &Path, out_dir: &Path) -> Result<Vec<GeneratedIcon>> {
    let icon = IconSource::load(source)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Unable to create {}", out_dir.display()))?;

    let mut generated = Vec::new();
    for spec in ICON_SPECS {
        let path = out_dir.join(spec.name);
        let saved = icon
            .render(spec.size)
            .and_then(|rendered| rendered.save(&path).map_err(Into::into));

        match saved {
            Ok(()) => {
                let bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
                info!(
                    category = spec.category,
                    name = spec.name,
                    size = spec.size,
                    bytes,
                    "generated icon"
                );
                generated.push(GeneratedIcon { spec, path, bytes });
            }
            Err(e) => error!(name = spec.name, error = %e, "failed to generate icon"),
        }
    }

    Ok(generated)
}

/// Names of the required icons that are not present in `out_dir`.
pub fn missing_icons(out_dir: &Path) -> Vec<&'static str> {
    ICON_SPECS
        .iter()
        .filter(|spec| !out_dir.join(spec.name).is_file())
        .map(|spec| spec.name)
        .collect()
}

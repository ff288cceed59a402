use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use materio::io::image::{DiskImageStore, ImageStore};
use materio::io::MaterialIo;
use materio::material::types::{Bxdf, InputValue, Material, MaterialKind, Texture};

fn checker_texture() -> Arc<Texture> {
    let mut pixels = RgbaImage::new(2, 2);
    pixels.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    pixels.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    pixels.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
    pixels.put_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
    Arc::new(Texture::new(DynamicImage::ImageRgba8(pixels)))
}

#[test]
fn png_round_trip_preserves_pixels() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("checker.png");

    let store = DiskImageStore;
    let texture = checker_texture();
    store.save(&path, &texture)?;

    let reloaded = store.load(&path)?;
    assert_eq!(reloaded.origin.as_deref(), Some(path.as_path()));
    assert_eq!(
        reloaded.data.to_rgba8().into_raw(),
        texture.data.to_rgba8().into_raw()
    );
    Ok(())
}

#[test]
fn documents_and_textures_land_in_the_same_directory() -> Result<(), anyhow::Error> {
    let texture = checker_texture();
    let paint = Material::create("paint", MaterialKind::Simple { bxdf: Bxdf::Lambert });
    paint
        .write()
        .expect("material lock poisoned")
        .set_input("albedo", InputValue::Texture(texture.clone()));

    let dir = tempfile::tempdir()?;
    let document = dir.path().join("materials.xml");

    let io = MaterialIo::new();
    io.save_materials(&document, &[paint])?;

    let texture_file = dir.path().join(format!("{}.png", texture.handle()));
    assert!(texture_file.is_file());

    let loaded = io.load_materials(&document)?;
    assert_eq!(loaded.len(), 1);
    let guard = loaded[0].read().expect("material lock poisoned");
    match guard.input("albedo") {
        Some(InputValue::Texture(t)) => {
            assert_eq!(t.data.width(), 2);
            assert_eq!(t.data.height(), 2);
        }
        other => panic!("expected texture input, got {:?}", other),
    }
    Ok(())
}

/// Tests for the lazily allocated Texture resource

use super::*;
use crate::renderer::mock_renderer::MockRenderer;

// ============================================================================
// Tests: TextureData
// ============================================================================

#[test]
fn test_solid_data_size() {
    let data = TextureData::solid(3, 2, [1, 2, 3, 4]);
    assert_eq!(data.pixels.len(), 24);
    assert_eq!(&data.pixels[20..24], &[1, 2, 3, 4]);
    assert!(data.validate().is_ok());
}

#[test]
fn test_checkerboard_alternates() {
    let white = [255, 255, 255, 255];
    let black = [0, 0, 0, 255];
    let data = TextureData::checkerboard(4, 4, 2, white, black);
    assert_eq!(&data.pixels[0..4], &white);
    // x = 2 lies in the second cell of the first row
    assert_eq!(&data.pixels[8..12], &black);
}

#[test]
fn test_validate_rejects_mismatched_data() {
    let data = TextureData::new(2, 2, vec![0u8; 10]);
    let reason = data.validate().unwrap_err();
    assert!(reason.contains("expected 16"));
    assert!(TextureData::new(0, 4, Vec::new()).validate().is_err());
}

// ============================================================================
// Tests: Lazy allocation
// ============================================================================

#[test]
fn test_texture_starts_unloaded() {
    let texture = Texture::new("albedo", TextureData::solid(4, 4, [255; 4]));
    assert_eq!(texture.state(), LoadState::Unloaded);
    assert!(texture.allocated_id().is_null());
    assert_eq!(texture.width(), 4);
    assert_eq!(texture.height(), 4);
}

#[test]
fn test_first_use_allocates_once() {
    let mut renderer = MockRenderer::new();
    let texture = Texture::new("albedo", TextureData::solid(4, 4, [255; 4]));

    let id = texture.id(&mut renderer);
    assert!(!id.is_null());
    assert!(texture.is_allocated());

    // Second use reuses the same GPU object
    assert_eq!(texture.id(&mut renderer), id);
    assert_eq!(texture.allocated_id(), id);
    assert_eq!(renderer.created_textures().len(), 1);
}

#[test]
fn test_format_follows_color_space() {
    let mut renderer = MockRenderer::new();
    let color = Texture::new("color", TextureData::solid(1, 1, [0; 4]));
    let linear = Texture::new_linear("normal", TextureData::solid(1, 1, [0; 4]));

    let color_format = color.ensure_loaded(&mut renderer).unwrap().info().format;
    let linear_format = linear.ensure_loaded(&mut renderer).unwrap().info().format;
    assert_eq!(color_format, TextureFormat::R8G8B8A8_SRGB);
    assert_eq!(linear_format, TextureFormat::R8G8B8A8_UNORM);
}

#[test]
fn test_bad_data_fails_without_touching_renderer() {
    let mut renderer = MockRenderer::new();
    let texture = Texture::new("broken", TextureData::new(2, 2, vec![0u8; 3]));

    assert!(texture.ensure_loaded(&mut renderer).is_err());
    assert!(texture.is_failed());
    assert!(texture.failure().unwrap().contains("broken"));
    assert!(texture.id(&mut renderer).is_null());
    assert!(renderer.created_textures().is_empty());
}

#[test]
fn test_backend_failure_is_terminal() {
    let mut failing = MockRenderer::failing_textures();
    let texture = Texture::new("albedo", TextureData::solid(2, 2, [0; 4]));
    assert!(texture.ensure_loaded(&mut failing).is_err());

    // A working renderer later does not resurrect it
    let mut working = MockRenderer::new();
    assert!(texture.ensure_loaded(&mut working).is_err());
    assert_eq!(texture.state(), LoadState::Failed);
}

#[test]
fn test_drop_releases_gpu_texture() {
    let mut renderer = MockRenderer::new();
    let texture = Texture::new("albedo", TextureData::solid(2, 2, [0; 4]));
    texture.ensure_loaded(&mut renderer).unwrap();
    assert_eq!(renderer.live_texture_count(), 1);

    drop(texture);
    assert_eq!(renderer.live_texture_count(), 0);
}

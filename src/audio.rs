use crate::core::{SOUND_MAX_DISTANCE, SOUND_REF_DISTANCE, SOUND_ROLLOFF_FACTOR};
use crate::dom;
use glam::Vec3;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| {
        log::error!("{} GainNode error: {:?}", label, e);
        anyhow::anyhow!("{} GainNode: {:?}", label, e)
    })?;
    g.gain().set_value(value);
    Ok(g)
}

/// Fixed-position emitter for the ambient loop: gain -> panner -> destination.
/// Returns the gain node to feed; the audio graph keeps the panner alive.
pub fn build_ambient_source(
    audio_ctx: &web::AudioContext,
    position: Vec3,
    level: f32,
) -> anyhow::Result<web::GainNode> {
    let panner = web::PannerNode::new(audio_ctx).map_err(|e| {
        log::error!("PannerNode error: {:?}", e);
        anyhow::anyhow!("PannerNode: {:?}", e)
    })?;
    panner.set_panning_model(web::PanningModelType::Hrtf);
    panner.set_distance_model(web::DistanceModelType::Inverse);
    panner.set_ref_distance(SOUND_REF_DISTANCE);
    panner.set_rolloff_factor(SOUND_ROLLOFF_FACTOR);
    panner.set_max_distance(SOUND_MAX_DISTANCE);
    panner.position_x().set_value(position.x);
    panner.position_y().set_value(position.y);
    panner.position_z().set_value(position.z);

    let gain = create_gain(audio_ctx, level, "Ambient")?;
    _ = gain.connect_with_audio_node(&panner);
    _ = panner.connect_with_audio_node(&audio_ctx.destination());
    Ok(gain)
}

/// Fetch and decode `url`, then loop it forever into `input`. Playback starts
/// immediately; a suspended context simply holds it until resumed.
pub async fn play_ambient_loop(
    audio_ctx: &web::AudioContext,
    url: &str,
    input: &web::GainNode,
) -> anyhow::Result<web::AudioBufferSourceNode> {
    let bytes = dom::fetch_array_buffer(url).await?;
    let decoding = audio_ctx
        .decode_audio_data(&bytes)
        .map_err(|e| anyhow::anyhow!("decodeAudioData {}: {:?}", url, e))?;
    let buffer: web::AudioBuffer = JsFuture::from(decoding)
        .await
        .map_err(|e| anyhow::anyhow!("decode {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("decode {}: not an AudioBuffer: {:?}", url, e))?;

    let src = audio_ctx
        .create_buffer_source()
        .map_err(|e| anyhow::anyhow!("AudioBufferSourceNode: {:?}", e))?;
    src.set_buffer(Some(&buffer));
    src.set_loop(true);
    _ = src.connect_with_audio_node(input);
    src.start()
        .map_err(|e| anyhow::anyhow!("start {}: {:?}", url, e))?;
    log::info!(
        "[audio] looping {} ({:.1}s, {} ch)",
        url,
        buffer.duration(),
        buffer.number_of_channels()
    );
    Ok(src)
}

/// Keep the listener glued to the camera: same position, facing the look
/// direction, with the camera's own up axis.
pub fn update_listener_to_camera(
    listener: &web::AudioListener,
    cam_eye: Vec3,
    forward: Vec3,
    up: Vec3,
) {
    listener.set_position(cam_eye.x as f64, cam_eye.y as f64, cam_eye.z as f64);
    _ = listener.set_orientation(
        forward.x as f64,
        forward.y as f64,
        forward.z as f64,
        up.x as f64,
        up.y as f64,
        up.z as f64,
    );
}

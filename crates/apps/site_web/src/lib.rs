use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use foundation::math::{Vec2, Vec3};
use gpu::renderer::{camera_view_proj, field_model, glow_model, mesh_model};
use gpu::tessellate::{StripBuffers, tessellate_strip};
use gpu::viewport::Viewport;
use interact::counter::Counter;
use interact::ripple::ripple_at;
use interact::scroll::{RevealSet, parallax_offset, scroll_progress};
use interact::tilt::tilt_angles;
use interact::typing::TypingEffect;
use relay::protocol::{ContactReply, ContactRequest};
use relay::submission::Submission;
use relay::submit::{RESTORE_DELAY_MS, SubmitFlow};
use runtime::pointer::PointerState;
use scene::state::SceneState;

mod wgpu;
use wgpu::{Globals, ParticleVertex, WgpuContext, init_wgpu_from_canvas_id, render_scene,
    resize_wgpu};

const CANVAS_ID: &str = "scene-canvas";
const SUBMIT_BUTTON_ID: &str = "contact-submit";
const CONTACT_FORM_ID: &str = "contact-form";
const CONTACT_ENDPOINT: &str = "/api/contact";

/// Seed for the particle field; fixed so every page load scatters the same
/// sky.
const FIELD_SEED: u32 = 7;

#[derive(Debug)]
pub struct SiteState {
    pub scene: SceneState,
    pub viewport: Viewport,
    pub pointer: PointerState,
    pub wgpu: Option<WgpuContext>,
    pub typing: TypingEffect,
    pub counters: Vec<Counter>,
    pub reveals: RevealSet,
    pub flow: SubmitFlow,
}

thread_local! {
    static STATE: RefCell<SiteState> = RefCell::new(SiteState {
        scene: SceneState::new(FIELD_SEED, 1280.0 / 720.0),
        viewport: Viewport::new(1280, 720),
        pointer: PointerState::new(),
        wgpu: None,
        typing: TypingEffect::new::<&str>(&[]),
        counters: Vec::new(),
        reveals: RevealSet::new(0),
        flow: SubmitFlow::new("Send Message"),
    });
}

fn build_globals(scene: &SceneState) -> Globals {
    let dirs = scene.lights.directional_dirs();
    let a = dirs.first().copied().unwrap_or_else(Vec3::zero);
    let b = dirs.get(1).copied().unwrap_or_else(Vec3::zero);

    Globals {
        view_proj: camera_view_proj(&scene.camera).0,
        mesh_model: mesh_model(&scene.mesh).0,
        glow_model: glow_model(&scene.mesh).0,
        field_model: field_model(&scene.field).0,
        light_dir_a: [a.x as f32, a.y as f32, a.z as f32],
        _pad0: 0.0,
        light_dir_b: [b.x as f32, b.y as f32, b.z as f32],
        _pad1: 0.0,
    }
}

fn build_particle_vertices(scene: &SceneState) -> Vec<ParticleVertex> {
    let field = &scene.particles;
    field
        .positions
        .iter()
        .zip(&field.colors)
        .zip(&field.sizes)
        .map(|((p, c), s)| ParticleVertex {
            position: [p.x as f32, p.y as f32, p.z as f32],
            color: [c.r as f32, c.g as f32, c.b as f32],
            size: *s as f32,
        })
        .collect()
}

fn render_current() -> Result<(), JsValue> {
    STATE.with(|state_ref| {
        let mut s = state_ref.borrow_mut();
        let globals = build_globals(&s.scene);
        let particles = build_particle_vertices(&s.scene);
        if let Some(ctx) = &mut s.wgpu {
            render_scene(ctx, &globals, &particles)?;
        }
        Ok(())
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

#[wasm_bindgen]
pub fn init_scene() {
    spawn_local(async move {
        if let Err(err) = init_scene_inner().await {
            web_sys::console::log_1(&JsValue::from_str(&format!("wgpu init error: {:?}", err)));
        }
    });
}

async fn init_scene_inner() -> Result<(), JsValue> {
    let strip: StripBuffers = STATE.with(|state| tessellate_strip(&state.borrow().scene.strip));
    let count = STATE.with(|state| state.borrow().scene.particles.len());

    let ctx = init_wgpu_from_canvas_id(CANVAS_ID, &strip, count as u32).await?;

    STATE.with(|state| {
        state.borrow_mut().wgpu = Some(ctx);
    });

    render_current()
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.viewport.resize(width as u32, height as u32);
        s.scene.camera.set_viewport(width, height);
        if let Some(ctx) = &mut s.wgpu {
            resize_wgpu(ctx, width as u32, height as u32);
        }
    });
}

/// Record a pointer move in client coordinates; takes effect on the next
/// frame.
#[wasm_bindgen]
pub fn pointer_moved(client_x: f64, client_y: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let viewport = Vec2::new(s.viewport.width as f64, s.viewport.height as f64);
        s.pointer.set_from_viewport(Vec2::new(client_x, client_y), viewport);
    });
}

/// Advances the scene by one fixed-timestep frame and renders it.
///
/// The timebase is nominal rather than wall-clock, so the animation is
/// replayable frame for frame.
#[wasm_bindgen]
pub fn advance_frame() -> Result<f64, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let SiteState {
            scene, pointer, ..
        } = &mut *s;
        scene.advance(pointer);
    });

    render_current()?;
    Ok(STATE.with(|state| state.borrow().scene.frame.time.0))
}

/// Scrolled fraction in [0, 1] for the top progress bar.
#[wasm_bindgen]
pub fn scroll_fraction(offset: f64, content_height: f64, viewport_height: f64) -> f64 {
    scroll_progress(offset, content_height, viewport_height)
}

/// Vertical offset in px for a parallax layer.
#[wasm_bindgen]
pub fn parallax_shift(scroll_offset: f64, rate: f64) -> f64 {
    parallax_offset(scroll_offset, rate)
}

/// Arm the fade-in tracker for `count` revealable elements.
#[wasm_bindgen]
pub fn reveal_init(count: usize) {
    STATE.with(|state| {
        state.borrow_mut().reveals = RevealSet::new(count);
    });
}

/// Check element rects (flat `[top, height, top, height, ...]` in document
/// coordinates) and return the indices that newly came into view.
#[wasm_bindgen]
pub fn reveal_update(rects: Vec<f64>, scroll_y: f64, viewport_height: f64) -> Vec<u32> {
    let pairs: Vec<(f64, f64)> = rects.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    STATE.with(|state| {
        state
            .borrow_mut()
            .reveals
            .update(&pairs, scroll_y, viewport_height)
            .into_iter()
            .map(|i| i as u32)
            .collect()
    })
}

#[wasm_bindgen]
pub fn typing_init(phrases: Vec<String>) {
    STATE.with(|state| {
        state.borrow_mut().typing = TypingEffect::new(&phrases);
    });
}

/// One tick of the hero typing effect; returns the text to display.
#[wasm_bindgen]
pub fn typing_tick() -> String {
    STATE.with(|state| state.borrow_mut().typing.tick())
}

/// Arm the stat counters; each ramps 0 → target over `total_ticks` ticks.
#[wasm_bindgen]
pub fn counters_init(targets: Vec<f64>, total_ticks: u32) {
    STATE.with(|state| {
        state.borrow_mut().counters = targets
            .iter()
            .map(|t| Counter::new(*t, total_ticks))
            .collect();
    });
}

/// One tick of every counter; returns the integer display values.
#[wasm_bindgen]
pub fn counters_tick() -> Vec<f64> {
    STATE.with(|state| {
        state
            .borrow_mut()
            .counters
            .iter_mut()
            .map(|c| {
                c.tick();
                c.display() as f64
            })
            .collect()
    })
}

#[wasm_bindgen]
pub fn counters_done() -> bool {
    STATE.with(|state| state.borrow().counters.iter().all(|c| c.done()))
}

/// Hover tilt for a card: returns `[rotate_x_deg, rotate_y_deg]` for the
/// pointer at `(local_x, local_y)` inside a `width` x `height` rect.
#[wasm_bindgen]
pub fn card_tilt(local_x: f64, local_y: f64, width: f64, height: f64, max_deg: f64) -> Vec<f64> {
    let t = tilt_angles(
        Vec2::new(local_x, local_y),
        Vec2::new(width, height),
        max_deg,
    );
    vec![t.x, t.y]
}

/// Click ripple geometry: returns `[center_x, center_y, radius]` covering
/// the whole rect from the click point.
#[wasm_bindgen]
pub fn click_ripple(click_x: f64, click_y: f64, width: f64, height: f64) -> Vec<f64> {
    let r = ripple_at(Vec2::new(click_x, click_y), Vec2::new(width, height));
    vec![r.center.x, r.center.y, r.radius]
}

#[wasm_bindgen]
pub fn submit_label() -> String {
    STATE.with(|state| state.borrow().flow.label().to_string())
}

#[wasm_bindgen]
pub fn submit_disabled() -> bool {
    STATE.with(|state| state.borrow().flow.disabled())
}

/// Submit the contact form.
///
/// A second call while a request is in flight is dropped silently; the
/// button stays disabled until the outcome label has been restored.
#[wasm_bindgen]
pub fn submit_contact(name: String, email: String, project: String, message: String) {
    let accepted = STATE.with(|state| state.borrow_mut().flow.begin().is_ok());
    if !accepted {
        return;
    }
    sync_submit_button();

    spawn_local(async move {
        let submission = Submission {
            name,
            email,
            project,
            message,
        };

        let sent = match submission.validate() {
            Ok(()) => post_contact(&submission).await,
            Err(err) => {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "contact validation failed: {err}"
                )));
                false
            }
        };

        STATE.with(|state| {
            let mut s = state.borrow_mut();
            let _ = if sent { s.flow.succeed() } else { s.flow.fail() };
        });
        sync_submit_button();

        if STATE.with(|state| state.borrow().flow.should_clear_fields()) {
            reset_contact_form();
        }

        schedule_submit_restore();
    });
}

async fn post_contact(submission: &Submission) -> bool {
    let request = ContactRequest {
        name: submission.name.clone(),
        email: submission.email.clone(),
        project: submission.project.clone(),
        message: submission.message.clone(),
    };

    let reply = async {
        let resp = Request::post(CONTACT_ENDPOINT)
            .json(&request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        resp.json::<ContactReply>().await.map_err(|e| e.to_string())
    }
    .await;

    match reply {
        Ok(reply) => {
            if !reply.ok {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "contact relay refused: {}",
                    reply.description.as_deref().unwrap_or("unknown")
                )));
            }
            reply.ok
        }
        Err(err) => {
            web_sys::console::log_1(&JsValue::from_str(&format!("contact send failed: {err}")));
            false
        }
    }
}

fn sync_submit_button() {
    let (label, disabled) = STATE.with(|state| {
        let s = state.borrow();
        (s.flow.label().to_string(), s.flow.disabled())
    });

    if let Some(button) = submit_button() {
        button.set_text_content(Some(&label));
        button.set_disabled(disabled);
    }
}

fn submit_button() -> Option<web_sys::HtmlButtonElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(SUBMIT_BUTTON_ID)?
        .dyn_into::<web_sys::HtmlButtonElement>()
        .ok()
}

fn reset_contact_form() {
    let form = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONTACT_FORM_ID))
        .and_then(|e| e.dyn_into::<web_sys::HtmlFormElement>().ok());
    if let Some(form) = form {
        form.reset();
    }
}

/// After the outcome label has been shown for `RESTORE_DELAY_MS`, put the
/// button back to its idle state.
fn schedule_submit_restore() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };

    let restore = Closure::once_into_js(move || {
        STATE.with(|state| state.borrow_mut().flow.restore());
        sync_submit_button();
    });

    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.unchecked_ref(),
        RESTORE_DELAY_MS as i32,
    );
}

#[cfg(test)]
mod tests {
    use super::{FIELD_SEED, build_globals, build_particle_vertices};
    use scene::particles::PARTICLE_COUNT;
    use scene::state::SceneState;

    #[test]
    fn globals_pack_both_light_directions() {
        let scene = SceneState::new(FIELD_SEED, 16.0 / 9.0);
        let globals = build_globals(&scene);

        for dir in [globals.light_dir_a, globals.light_dir_b] {
            let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
        assert_ne!(globals.light_dir_a, globals.light_dir_b);
    }

    #[test]
    fn rest_scene_has_identity_mesh_model() {
        let scene = SceneState::new(FIELD_SEED, 1.0);
        let globals = build_globals(&scene);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((globals.mesh_model[i][j] - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn particle_vertices_carry_the_whole_field() {
        let scene = SceneState::new(FIELD_SEED, 1.0);
        let verts = build_particle_vertices(&scene);
        assert_eq!(verts.len(), PARTICLE_COUNT);

        for (v, p) in verts.iter().zip(&scene.particles.positions) {
            assert_eq!(v.position[0], p.x as f32);
        }
        for v in &verts {
            assert!(v.size >= 0.5 && v.size <= 2.5);
            for c in v.color {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}

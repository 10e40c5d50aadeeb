//! Canvas-2D renderer
//!
//! Pure read of `{GameState, GameAssets}`: draws back to front once per frame
//! and never touches simulation state. Every image has a flat-shape fallback,
//! so any subset of assets may be missing.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::assets::GameAssets;
use crate::consts::*;
use crate::sim::{Collectible, GamePhase, GameState, Obstacle, Player};

/// Palette for the no-image fallbacks and the overlays
mod colors {
    pub const SKY_TOP: &str = "#1b1740";
    pub const SKY_BOTTOM: &str = "#0a081f";
    pub const OBSTACLE: &str = "#d9503c";
    pub const COLLECTIBLE: &str = "#4ed98a";
    pub const PLAYER: &str = "#3fb9e6";
    pub const DIM_HEAVY: &str = "rgba(0, 0, 0, 0.7)";
    pub const DIM_LIGHT: &str = "rgba(0, 0, 0, 0.5)";
    pub const TEXT_WARM: &str = "#f2a25c";
    pub const TEXT_COOL: &str = "#7fd4f0";
    pub const TEXT_GO: &str = "#8ae68a";
}

/// On-screen player sprite footprint (the hitbox stays in `consts`)
const PLAYER_SPRITE: f64 = 64.0;
const PLAYER_FALLBACK_RADIUS: f64 = 25.0;
const COLLECTIBLE_SPRITE: f64 = 40.0;
const COLLECTIBLE_FALLBACK_RADIUS: f64 = 15.0;
/// Wall-clock ms per radian of collectible spin (cosmetic only)
const SPIN_MS_PER_RADIAN: f64 = 500.0;

/// Draw one frame; `time_ms` feeds only the collectible spin
pub fn draw(ctx: &CanvasRenderingContext2d, state: &GameState, assets: &GameAssets, time_ms: f64) {
    let (w, h) = (FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
    ctx.clear_rect(0.0, 0.0, w, h);

    draw_background(ctx, assets.background.as_ref());

    for obstacle in &state.obstacles {
        draw_obstacle(ctx, assets.element.as_ref(), obstacle);
    }
    for collectible in &state.collectibles {
        if !collectible.collected {
            draw_collectible(ctx, assets.element.as_ref(), collectible, time_ms);
        }
    }
    draw_player(ctx, assets.player.as_ref(), &state.player);

    match state.phase {
        GamePhase::GameOver => draw_game_over(ctx),
        GamePhase::Idle => draw_start_prompt(ctx),
        GamePhase::Paused => draw_pause_overlay(ctx),
        GamePhase::Running => {}
    }
}

fn draw_background(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>) {
    let (w, h) = (FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
    if let Some(image) = image {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w, h);
    } else {
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0, colors::SKY_TOP);
        let _ = gradient.add_color_stop(1.0, colors::SKY_BOTTOM);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);
    }
}

fn draw_obstacle(
    ctx: &CanvasRenderingContext2d,
    image: Option<&HtmlImageElement>,
    obstacle: &Obstacle,
) {
    let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
    let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);
    if let Some(image) = image {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h);
    } else {
        ctx.set_fill_style_str(colors::OBSTACLE);
        ctx.fill_rect(x, y, w, h);
    }
}

fn draw_collectible(
    ctx: &CanvasRenderingContext2d,
    image: Option<&HtmlImageElement>,
    collectible: &Collectible,
    time_ms: f64,
) {
    let half = COLLECTIBLE_SPRITE / 2.0;
    ctx.save();
    let _ = ctx.translate(collectible.pos.x as f64 + half, collectible.pos.y as f64 + half);
    let _ = ctx.rotate(time_ms / SPIN_MS_PER_RADIAN);

    if let Some(image) = image {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            -half,
            -half,
            COLLECTIBLE_SPRITE,
            COLLECTIBLE_SPRITE,
        );
    } else {
        ctx.set_fill_style_str(colors::COLLECTIBLE);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, COLLECTIBLE_FALLBACK_RADIUS, 0.0, TAU);
        ctx.fill();
    }
    ctx.restore();
}

fn draw_player(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>, player: &Player) {
    let (x, y) = (player.pos.x as f64, player.pos.y as f64);
    if let Some(image) = image {
        let half = PLAYER_SPRITE / 2.0;
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            x - half,
            y - half,
            PLAYER_SPRITE,
            PLAYER_SPRITE,
        );
    } else {
        ctx.set_fill_style_str(colors::PLAYER);
        ctx.begin_path();
        let _ = ctx.arc(x, y, PLAYER_FALLBACK_RADIUS, 0.0, TAU);
        ctx.fill();
    }
}

fn dim(ctx: &CanvasRenderingContext2d, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
}

fn centered_text(ctx: &CanvasRenderingContext2d, text: &str, font: &str, color: &str, y: f64) {
    ctx.set_fill_style_str(color);
    ctx.set_font(font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(text, FIELD_WIDTH as f64 / 2.0, y);
}

fn draw_game_over(ctx: &CanvasRenderingContext2d) {
    let mid = FIELD_HEIGHT as f64 / 2.0;
    dim(ctx, colors::DIM_HEAVY);
    centered_text(ctx, "GAME OVER", "bold 48px system-ui", colors::TEXT_WARM, mid - 30.0);
    centered_text(
        ctx,
        "Press Restart to play again",
        "24px system-ui",
        colors::TEXT_COOL,
        mid + 30.0,
    );
}

fn draw_start_prompt(ctx: &CanvasRenderingContext2d) {
    let mid = FIELD_HEIGHT as f64 / 2.0;
    dim(ctx, colors::DIM_LIGHT);
    centered_text(
        ctx,
        "Press Start to Begin",
        "bold 36px system-ui",
        colors::TEXT_GO,
        mid - 40.0,
    );
    centered_text(
        ctx,
        "Use Arrow Keys to Move",
        "20px system-ui",
        colors::TEXT_COOL,
        mid + 10.0,
    );
    centered_text(
        ctx,
        "Collect the orbs, avoid the blocks",
        "20px system-ui",
        colors::TEXT_COOL,
        mid + 40.0,
    );
}

fn draw_pause_overlay(ctx: &CanvasRenderingContext2d) {
    let mid = FIELD_HEIGHT as f64 / 2.0;
    dim(ctx, colors::DIM_LIGHT);
    centered_text(ctx, "Paused", "bold 36px system-ui", colors::TEXT_COOL, mid);
}

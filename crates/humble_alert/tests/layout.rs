//! Layout of attached alerts against the headless host

use std::rc::Rc;

use humble_alert::prelude::*;
use humble_alert::{compute_layout, KeyboardState, LayoutInput};
use humble_headless::HeadlessPlatform;
use humble_platform::{
    DeviceIdiom, EstimatedTextMeasurer, LabelSlot, Orientation, Platform, Rect, Size,
};

fn host(idiom: DeviceIdiom, width: f32, height: f32) -> Rc<HeadlessPlatform> {
    Rc::new(HeadlessPlatform::new(idiom, Size::new(width, height)))
}

#[test]
fn frame_matches_pure_layout() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let ctx = AlertContext::new(host.clone());
    let alert = AlertView::with_message(&ctx, "Saved", "Your changes are safe.");
    alert.show().unwrap();

    let config = AlertConfig::default();
    let (title_font, message_font) = (config.title_font(), config.message_font());
    let expected = compute_layout(
        &LayoutInput {
            title: "Saved",
            message: "Your changes are safe.",
            title_font: &title_font,
            message_font: &message_font,
            idiom: DeviceIdiom::Phone,
            parent: Size::new(375.0, 667.0),
            position: AlertPosition::Bottom,
            top_content_margin: 0.0,
            bottom_content_margin: 0.0,
            inner_margin: 25.0,
            keyboard: KeyboardState::default(),
        },
        &config,
        &EstimatedTextMeasurer,
    );

    assert_eq!(host.frame(alert.view_id()), Some(expected.frame));
    assert_eq!(alert.last_layout(), Some(expected));
    let message = host.label(alert.view_id(), LabelSlot::Message).unwrap();
    assert_eq!(Some(message.frame), expected.message);
}

#[test]
fn layout_is_idempotent() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let ctx = AlertContext::new(host.clone());
    let alert = AlertView::with_message(&ctx, "Saved", "Your changes are safe.");
    alert.show().unwrap();

    let before = host.frame(alert.view_id());
    alert.layout();
    alert.layout();
    assert_eq!(host.frame(alert.view_id()), before);
}

#[test]
fn layout_is_skipped_while_detached() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let ctx = AlertContext::new(host.clone());
    let alert = AlertView::with_title(&ctx, "Idle");

    alert.set_position(AlertPosition::Center);
    alert.layout();
    host.show_keyboard(300.0);

    assert!(alert.last_layout().is_none());
    assert_eq!(host.frame(alert.view_id()), Some(Rect::ZERO));
}

#[test]
fn rotation_recenters_the_alert() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let ctx = AlertContext::new(host.clone());
    let alert = AlertView::with_title(&ctx, "Turn");
    alert.set_position(AlertPosition::Center);
    alert.show().unwrap();

    let portrait = host.frame(alert.view_id()).unwrap();
    host.rotate(Orientation::LandscapeLeft);
    let landscape = host.frame(alert.view_id()).unwrap();

    assert_eq!(alert.orientation(), Orientation::LandscapeLeft);
    assert_eq!(host.orientation(), Orientation::LandscapeLeft);
    assert!(landscape.y() < portrait.y());
    let center = landscape.center();
    assert!((center.x - 667.0 / 2.0).abs() <= 1.0);
    assert!((center.y - 375.0 / 2.0).abs() <= 1.0);
}

#[test]
fn keyboard_only_moves_bottom_alerts() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let ctx = AlertContext::new(host.clone());
    let other = host.add_container(Size::new(375.0, 667.0));

    let bottom = AlertView::with_title(&ctx, "Bottom");
    let top = AlertView::with_title(&ctx, "Top");
    top.set_position(AlertPosition::Top);
    bottom.show().unwrap();
    top.show_in(other).unwrap();

    let bottom_before = host.frame(bottom.view_id()).unwrap();
    let top_before = host.frame(top.view_id()).unwrap();

    host.show_keyboard(216.0);
    assert_eq!(
        host.frame(bottom.view_id()).unwrap().y(),
        bottom_before.y() - 216.0
    );
    assert_eq!(host.frame(top.view_id()).unwrap(), top_before);

    host.hide_keyboard();
    assert_eq!(host.frame(bottom.view_id()).unwrap(), bottom_before);
}

#[test]
fn tablet_alerts_are_capped_and_inset() {
    let host = host(DeviceIdiom::Tablet, 1024.0, 768.0);
    let ctx = AlertContext::new(host.clone());
    let long = "word ".repeat(200);
    let alert = AlertView::with_message(&ctx, "Tablet", long.trim());
    alert.show().unwrap();

    let frame = host.frame(alert.view_id()).unwrap();
    assert_eq!(alert.inner_margin(), 50.0);
    assert!(frame.width() <= 520.0);
    assert_eq!(frame.max_y(), 768.0 - 50.0);
}

#[test]
fn phone_alerts_keep_clear_of_the_edges() {
    let host = host(DeviceIdiom::Phone, 320.0, 568.0);
    let ctx = AlertContext::new(host.clone());
    let long = "word ".repeat(100);
    let alert = AlertView::with_message(&ctx, &long, long.trim());
    alert.show().unwrap();

    let frame = host.frame(alert.view_id()).unwrap();
    assert!(frame.x() >= 20.0);
    assert!(frame.width() <= 320.0 - 40.0);
}

#[test]
fn narrow_phone_parent_keeps_the_box_inside() {
    let host = host(DeviceIdiom::Phone, 50.0, 100.0);
    let ctx = AlertContext::new(host.clone());
    let alert = AlertView::with_title(&ctx, "Hello there");
    alert.show().unwrap();

    // Wrap width is negative here, labels fall back to one glyph per line
    let frame = host.frame(alert.view_id()).unwrap();
    assert!(frame.x() >= 0.0);
    assert!(frame.width() <= 50.0);
    let title = host.label(alert.view_id(), LabelSlot::Title).unwrap();
    assert!(title.frame.height() > 17.0);
}

#[test]
fn custom_config_changes_metrics() {
    let host = host(DeviceIdiom::Phone, 375.0, 667.0);
    let config = AlertConfig::from_toml_str(
        r#"
        phone_inner_margin = 40.0
        vertical_padding = 10.0
        "#,
    )
    .unwrap();
    let ctx = AlertContext::with_config(host.clone(), config);
    let alert = AlertView::with_title(&ctx, "Tuned");
    alert.set_position(AlertPosition::Top);
    alert.show().unwrap();

    assert_eq!(host.frame(alert.view_id()).unwrap().y(), 40.0);
    let title = host.label(alert.view_id(), LabelSlot::Title).unwrap();
    assert_eq!(title.frame.y(), 10.0);
}

//! Alert layout
//!
//! [`compute_layout`] is a pure function of the alert content, fonts, device
//! class, parent size, position, margins and keyboard state. It can be
//! recomputed any number of times and always yields the same frames.
//!
//! Heights of the padding terms are rounded down before they are summed while
//! the final frame and label sizes are rounded up, so that labels never clip
//! their glyphs.

use humble_platform::{DeviceIdiom, Font, Rect, Size, TextMeasurer};

use crate::config::AlertConfig;
use crate::style::AlertPosition;

/// Software keyboard state as last reported by the host
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardState {
    pub visible: bool,
    pub height: f32,
}

/// Everything the layout depends on
#[derive(Clone, Debug)]
pub struct LayoutInput<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub title_font: &'a Font,
    pub message_font: &'a Font,
    pub idiom: DeviceIdiom,
    /// Bounds of the container the alert is attached to
    pub parent: Size,
    pub position: AlertPosition,
    pub top_content_margin: f32,
    pub bottom_content_margin: f32,
    /// Distance kept from the top/bottom edge
    pub inner_margin: f32,
    pub keyboard: KeyboardState,
}

/// Result of a layout pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlertLayout {
    /// Box frame in the container's coordinates
    pub frame: Rect,
    /// Title label frame in the box's coordinates
    pub title: Rect,
    /// Message label frame in the box's coordinates (None without a message)
    pub message: Option<Rect>,
}

/// Widest a label may get before wrapping
pub fn max_label_width(idiom: DeviceIdiom, parent_width: f32, config: &AlertConfig) -> f32 {
    let padding = config.horizontal_padding * 2.0;
    match idiom {
        DeviceIdiom::Phone => parent_width - config.phone_outer_inset - padding,
        DeviceIdiom::Tablet => config.tablet_max_width - padding,
    }
}

/// Compute the box and label frames
pub fn compute_layout<M>(input: &LayoutInput<'_>, config: &AlertConfig, measurer: &M) -> AlertLayout
where
    M: TextMeasurer + ?Sized,
{
    let h_pad = config.horizontal_padding;
    let v_pad = config.vertical_padding;
    let parent = input.parent;

    let max_width = max_label_width(input.idiom, parent.width, config);

    let title_size = measurer.bounding_size(input.title, input.title_font, max_width);
    let has_message = !input.message.is_empty();
    let message_size = if has_message {
        measurer.bounding_size(input.message, input.message_font, max_width)
    } else {
        Size::ZERO
    };

    let total_height = if has_message {
        title_size.height + message_size.height + (v_pad * 2.5).floor()
    } else {
        title_size.height + (v_pad * 2.0).floor()
    };

    let label_width = if title_size.width == max_width || message_size.width == max_width {
        max_width
    } else if message_size.width > title_size.width {
        message_size.width
    } else {
        title_size.width
    };

    let total_width = label_width + h_pad * 2.0;
    let x = (parent.width / 2.0 - total_width / 2.0).floor();
    let y = match input.position {
        AlertPosition::Center => (parent.height / 2.0 - total_height / 2.0).ceil(),
        AlertPosition::Top => input.inner_margin + input.top_content_margin,
        AlertPosition::Bottom => {
            parent.height
                - total_height.ceil()
                - input.inner_margin
                - input.bottom_content_margin
        }
    };

    let mut frame = Rect::new(x, y, total_width.ceil(), total_height.ceil());
    if input.keyboard.visible && input.position == AlertPosition::Bottom {
        frame = frame.offset(0.0, -input.keyboard.height);
    }

    let title = Rect::new(
        h_pad,
        v_pad.ceil(),
        label_width.ceil(),
        title_size.height.ceil(),
    );
    let message = has_message.then(|| {
        Rect::new(
            h_pad,
            title_size.height.ceil() + (v_pad * 1.5).floor(),
            label_width.ceil(),
            message_size.height.ceil(),
        )
    });

    AlertLayout {
        frame,
        title,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humble_platform::{TextLayoutOptions, TextMetrics};
    use proptest::prelude::*;

    /// Measurer returning fixed sizes per text, clamped to the wrap width
    struct TableMeasurer(Vec<(&'static str, Size)>);

    impl TextMeasurer for TableMeasurer {
        fn measure_with_options(
            &self,
            text: &str,
            _font: &Font,
            options: &TextLayoutOptions,
        ) -> TextMetrics {
            let size = self
                .0
                .iter()
                .find(|(t, _)| *t == text)
                .map(|(_, s)| *s)
                .unwrap_or(Size::ZERO);
            let max = options.max_width.unwrap_or(f32::MAX);
            TextMetrics {
                width: size.width.min(max),
                height: size.height,
                line_count: 1,
            }
        }
    }

    fn phone_input<'a>(
        title: &'a str,
        message: &'a str,
        fonts: &'a (Font, Font),
        position: AlertPosition,
    ) -> LayoutInput<'a> {
        LayoutInput {
            title,
            message,
            title_font: &fonts.0,
            message_font: &fonts.1,
            idiom: DeviceIdiom::Phone,
            parent: Size::new(375.0, 667.0),
            position,
            top_content_margin: 0.0,
            bottom_content_margin: 0.0,
            inner_margin: 25.0,
            keyboard: KeyboardState::default(),
        }
    }

    fn fonts() -> (Font, Font) {
        let config = AlertConfig::default();
        (config.title_font(), config.message_font())
    }

    fn measurer() -> TableMeasurer {
        TableMeasurer(vec![
            ("Title", Size::new(100.0, 20.0)),
            ("Message", Size::new(150.0, 34.0)),
            ("Wide", Size::new(1000.0, 40.0)),
            ("Short", Size::new(200.0, 20.0)),
        ])
    }

    #[test]
    fn test_max_label_width() {
        let config = AlertConfig::default();
        assert_eq!(max_label_width(DeviceIdiom::Phone, 375.0, &config), 299.0);
        assert_eq!(max_label_width(DeviceIdiom::Tablet, 1024.0, &config), 484.0);
        assert_eq!(max_label_width(DeviceIdiom::Tablet, 320.0, &config), 484.0);
    }

    #[test]
    fn test_bottom_title_only() {
        let fonts = fonts();
        let input = phone_input("Title", "", &fonts, AlertPosition::Bottom);
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer());

        // height = 20 + floor(28) = 48, width = 100 + 36 = 136
        assert_eq!(layout.frame, Rect::new(119.0, 667.0 - 48.0 - 25.0, 136.0, 48.0));
        assert_eq!(layout.title, Rect::new(18.0, 14.0, 100.0, 20.0));
        assert!(layout.message.is_none());
    }

    #[test]
    fn test_center_with_message() {
        let fonts = fonts();
        let input = phone_input("Title", "Message", &fonts, AlertPosition::Center);
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer());

        // height = 20 + 34 + floor(35) = 89, width = 150 + 36 = 186
        assert_eq!(layout.frame, Rect::new(94.0, 289.0, 186.0, 89.0));
        assert_eq!(layout.title, Rect::new(18.0, 14.0, 150.0, 20.0));
        assert_eq!(layout.message, Some(Rect::new(18.0, 41.0, 150.0, 34.0)));
    }

    #[test]
    fn test_top_uses_content_margin() {
        let fonts = fonts();
        let mut input = phone_input("Title", "Message", &fonts, AlertPosition::Top);
        input.top_content_margin = 64.0;
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer());
        assert_eq!(layout.frame.y(), 89.0);
    }

    #[test]
    fn test_bottom_margin_and_keyboard() {
        let fonts = fonts();
        let mut input = phone_input("Title", "Message", &fonts, AlertPosition::Bottom);
        input.bottom_content_margin = 50.0;
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer());
        assert_eq!(layout.frame.y(), 667.0 - 89.0 - 25.0 - 50.0);

        input.keyboard = KeyboardState {
            visible: true,
            height: 216.0,
        };
        let shifted = compute_layout(&input, &AlertConfig::default(), &measurer());
        assert_eq!(shifted.frame.y(), layout.frame.y() - 216.0);
        assert_eq!(shifted.frame.size, layout.frame.size);
    }

    #[test]
    fn test_keyboard_ignored_away_from_bottom() {
        let fonts = fonts();
        let mut input = phone_input("Title", "", &fonts, AlertPosition::Center);
        let before = compute_layout(&input, &AlertConfig::default(), &measurer());
        input.keyboard = KeyboardState {
            visible: true,
            height: 300.0,
        };
        let after = compute_layout(&input, &AlertConfig::default(), &measurer());
        assert_eq!(before, after);
    }

    #[test]
    fn test_width_clamps_to_max_on_tablet() {
        let fonts = fonts();
        let input = LayoutInput {
            idiom: DeviceIdiom::Tablet,
            parent: Size::new(1024.0, 768.0),
            inner_margin: 50.0,
            ..phone_input("Wide", "Short", &fonts, AlertPosition::Bottom)
        };
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer());

        // label width clamps to 484, height = 40 + 20 + 35 = 95
        assert_eq!(layout.frame, Rect::new(252.0, 768.0 - 95.0 - 50.0, 520.0, 95.0));
        assert_eq!(layout.title.width(), 484.0);
        assert_eq!(layout.message.map(|m| m.width()), Some(484.0));
    }

    #[test]
    fn test_fractional_sizes_round_up() {
        let fonts = fonts();
        let measurer = TableMeasurer(vec![("Odd", Size::new(80.4, 20.3))]);
        let input = phone_input("Odd", "", &fonts, AlertPosition::Top);
        let layout = compute_layout(&input, &AlertConfig::default(), &measurer);

        assert_eq!(layout.frame.width(), 117.0);
        assert_eq!(layout.frame.height(), 49.0);
        assert_eq!(layout.title.width(), 81.0);
        assert_eq!(layout.title.height(), 21.0);
    }

    fn position() -> impl Strategy<Value = AlertPosition> {
        prop_oneof![
            Just(AlertPosition::Top),
            Just(AlertPosition::Center),
            Just(AlertPosition::Bottom),
        ]
    }

    proptest! {
        #[test]
        fn prop_layout_is_deterministic(
            width in 200.0f32..1400.0,
            height in 200.0f32..1400.0,
            top in 0.0f32..100.0,
            bottom in 0.0f32..100.0,
            keyboard in 0.0f32..400.0,
            keyboard_visible in any::<bool>(),
            tablet in any::<bool>(),
            position in position(),
            title in "[a-zA-Z ]{0,60}",
            message in "[a-zA-Z ]{0,120}",
        ) {
            let config = AlertConfig::default();
            let (title_font, message_font) = fonts();
            let idiom = if tablet { DeviceIdiom::Tablet } else { DeviceIdiom::Phone };
            let input = LayoutInput {
                title: &title,
                message: &message,
                title_font: &title_font,
                message_font: &message_font,
                idiom,
                parent: Size::new(width, height),
                position,
                top_content_margin: top,
                bottom_content_margin: bottom,
                inner_margin: config.inner_margin(idiom),
                keyboard: KeyboardState { visible: keyboard_visible, height: keyboard },
            };
            let measurer = humble_platform::EstimatedTextMeasurer;

            let first = compute_layout(&input, &config, &measurer);
            let second = compute_layout(&input, &config, &measurer);
            prop_assert_eq!(first, second);

            let max = max_label_width(idiom, width, &config);
            prop_assert!(first.title.width() <= max.ceil());
            prop_assert_eq!(first.message.is_some(), !message.is_empty());
            prop_assert!(first.frame.width() >= first.title.width());
        }
    }
}

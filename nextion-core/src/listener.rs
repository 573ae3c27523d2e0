//! Touch listener trait and event dispatch

use nextion_protocol::{TouchEvent, TouchKind};

/// A touchable component on the display
///
/// Implemented by the widget layer (buttons, sliders, hotspots). A
/// listener is identified by the page it lives on and its component id.
/// The driver only borrows listeners for the duration of a dispatch.
pub trait TouchListener {
    /// Page the component lives on
    fn page_id(&self) -> u8;

    /// Component id within the page
    fn component_id(&self) -> u8;

    /// Called when the component is pressed
    fn on_press(&mut self) {}

    /// Called when the component is released
    fn on_release(&mut self) {}
}

/// Deliver `event` to the first listener registered for its component
///
/// Listeners are searched in slice order, so earlier entries take priority
/// when two share the same page and component id. Returns false if no
/// listener matched.
pub fn dispatch_touch(event: &TouchEvent, listeners: &mut [&mut dyn TouchListener]) -> bool {
    let Some(listener) = listeners
        .iter_mut()
        .find(|l| event.targets(l.page_id(), l.component_id()))
    else {
        return false;
    };

    match event.kind {
        TouchKind::Press => listener.on_press(),
        TouchKind::Release => listener.on_release(),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Button {
        page: u8,
        id: u8,
        presses: u32,
        releases: u32,
    }

    impl Button {
        fn new(page: u8, id: u8) -> Self {
            Self {
                page,
                id,
                ..Self::default()
            }
        }
    }

    impl TouchListener for Button {
        fn page_id(&self) -> u8 {
            self.page
        }

        fn component_id(&self) -> u8 {
            self.id
        }

        fn on_press(&mut self) {
            self.presses += 1;
        }

        fn on_release(&mut self) {
            self.releases += 1;
        }
    }

    /// Listener that ignores releases
    struct Hotspot {
        hits: u32,
    }

    impl TouchListener for Hotspot {
        fn page_id(&self) -> u8 {
            1
        }

        fn component_id(&self) -> u8 {
            9
        }

        fn on_press(&mut self) {
            self.hits += 1;
        }
    }

    #[test]
    fn test_press_and_release() {
        let mut ok = Button::new(0, 2);
        let mut cancel = Button::new(0, 3);
        let mut listeners: [&mut dyn TouchListener; 2] = [&mut ok, &mut cancel];

        assert!(dispatch_touch(
            &TouchEvent::new(0, 2, TouchKind::Press),
            &mut listeners
        ));
        assert!(dispatch_touch(
            &TouchEvent::new(0, 2, TouchKind::Release),
            &mut listeners
        ));

        assert_eq!((ok.presses, ok.releases), (1, 1));
        assert_eq!((cancel.presses, cancel.releases), (0, 0));
    }

    #[test]
    fn test_first_match_wins() {
        let mut first = Button::new(0, 1);
        let mut shadowed = Button::new(0, 1);
        let mut listeners: [&mut dyn TouchListener; 2] = [&mut first, &mut shadowed];

        dispatch_touch(&TouchEvent::new(0, 1, TouchKind::Press), &mut listeners);

        assert_eq!(first.presses, 1);
        assert_eq!(shadowed.presses, 0);
    }

    #[test]
    fn test_unmatched_event_is_dropped() {
        let mut button = Button::new(0, 1);
        let mut listeners: [&mut dyn TouchListener; 1] = [&mut button];

        assert!(!dispatch_touch(
            &TouchEvent::new(1, 1, TouchKind::Press),
            &mut listeners
        ));
        assert!(!dispatch_touch(&TouchEvent::new(0, 1, TouchKind::Press), &mut []));
        assert_eq!(button.presses, 0);
    }

    #[test]
    fn test_default_callbacks_are_noops() {
        let mut hotspot = Hotspot { hits: 0 };
        let mut listeners: [&mut dyn TouchListener; 1] = [&mut hotspot];

        assert!(dispatch_touch(
            &TouchEvent::new(1, 9, TouchKind::Release),
            &mut listeners
        ));
        assert_eq!(hotspot.hits, 0);
    }

    proptest! {
        #[test]
        fn prop_only_matching_callback_fires(
            page in 0u8..4,
            component in 0u8..4,
            press in any::<bool>(),
        ) {
            let mut grid: std::vec::Vec<Button> = (0..4u8)
                .flat_map(|p| (0..4u8).map(move |c| Button::new(p, c)))
                .collect();
            let kind = if press { TouchKind::Press } else { TouchKind::Release };

            {
                let mut listeners: std::vec::Vec<&mut dyn TouchListener> = grid
                    .iter_mut()
                    .map(|b| b as &mut dyn TouchListener)
                    .collect();
                prop_assert!(dispatch_touch(
                    &TouchEvent::new(page, component, kind),
                    &mut listeners
                ));
            }

            for button in &grid {
                let hit = button.page == page && button.id == component;
                let expected = if hit {
                    if press { (1, 0) } else { (0, 1) }
                } else {
                    (0, 0)
                };
                prop_assert_eq!((button.presses, button.releases), expected);
            }
        }
    }
}

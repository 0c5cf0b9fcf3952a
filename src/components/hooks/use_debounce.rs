use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Timer-reset coalescing: every `push` supersedes the previous one, and only
/// the timer scheduled for the latest generation gets the value back.
#[derive(Clone, Debug)]
pub(crate) struct Debounce<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debounce<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }
}

/// Returns a callback that forwards its argument to `on_commit` once `delay_ms`
/// pass without another call.
pub(crate) fn use_debounce<T>(delay_ms: i32, on_commit: Callback<T>) -> Callback<T>
where
    T: Send + Sync + 'static,
{
    let state = StoredValue::new(Debounce::<T>::new());
    let timer_id: StoredValue<Option<i32>> = StoredValue::new(None);

    on_cleanup(move || {
        if let (Some(win), Some(tid)) = (web_sys::window(), timer_id.try_get_value().flatten()) {
            win.clear_timeout_with_handle(tid);
        }
    });

    Callback::new(move |value: T| {
        let Some(win) = web_sys::window() else {
            return;
        };

        if let Some(tid) = timer_id.get_value() {
            win.clear_timeout_with_handle(tid);
        }

        let generation = state
            .try_update_value(|d| d.push(value))
            .unwrap_or_default();

        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            if let Some(value) = state.try_update_value(|d| d.fire(generation)).flatten() {
                timer_id.set_value(None);
                on_commit.run(value);
            }
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok();
        timer_id.set_value(tid);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_fires() {
        let mut d = Debounce::new();
        let g1 = d.push("a");
        let g2 = d.push("ab");
        assert!(d.fire(g1).is_none());
        assert_eq!(d.fire(g2), Some("ab"));
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut d = Debounce::new();
        let g = d.push(1);
        assert_eq!(d.fire(g), Some(1));
        assert!(d.fire(g).is_none());
    }

    #[test]
    fn test_push_after_fire_starts_new_window() {
        let mut d = Debounce::new();
        let g1 = d.push("x");
        d.fire(g1);
        let g2 = d.push("y");
        assert!(g2 > g1);
        assert_eq!(d.fire(g2), Some("y"));
    }
}

use crate::{
    frontend::SceneSwitching,
    midi::{ControlEvent, EventKind},
};

/// Maps a contiguous range of addresses onto the scene list: the address
/// equal to `base_address` targets scene 0, the next one scene 1, and so
/// on. With `velocity_scaling` the event value acts as a percentage of
/// the configured duration, where 100 means the full duration and values
/// above 100 extrapolate linearly.
#[derive(Debug, Clone)]
pub struct TransitionTrigger {
    pub kind: EventKind,
    pub base_address: u8,
    pub duration_ms: u32,
    pub velocity_scaling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub scene_index: usize,
    pub duration_ms: u32,
}

impl TransitionTrigger {
    /// What this trigger would do for `event`, before the scene list is
    /// consulted. Addresses below the base are not ours.
    pub fn plan(&self, event: &ControlEvent) -> Option<TransitionPlan> {
        if event.kind != self.kind || event.address < self.base_address {
            return None;
        }

        let duration_ms = if self.velocity_scaling {
            (u64::from(self.duration_ms) * u64::from(event.value) / 100) as u32
        } else {
            self.duration_ms
        };

        Some(TransitionPlan {
            scene_index: usize::from(event.address - self.base_address),
            duration_ms,
        })
    }

    pub(crate) fn handle<S: SceneSwitching + ?Sized>(&self, event: &ControlEvent, scenes: &mut S) {
        let Some(plan) = self.plan(event) else {
            return;
        };

        let names = scenes.scene_names();
        if plan.scene_index >= names.len() {
            log::error!(
                "[ dispatch ] : invalid scene number : {} (have {})",
                plan.scene_index,
                names.len()
            );
            return;
        }

        log::info!(
            "[ dispatch ] : transition to scene #{} ({}) over {}ms",
            plan.scene_index,
            names[plan.scene_index],
            plan.duration_ms
        );
        scenes.start_transition(plan.scene_index, plan.duration_ms);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn trigger(velocity_scaling: bool) -> TransitionTrigger {
        TransitionTrigger {
            kind: EventKind::ControlChange,
            base_address: 10,
            duration_ms: 1000,
            velocity_scaling,
        }
    }

    fn cc(address: u8, value: u8) -> ControlEvent {
        ControlEvent {
            kind: EventKind::ControlChange,
            address,
            value,
        }
    }

    struct FakeScenes {
        names: Vec<String>,
        started: Vec<(usize, u32)>,
    }

    impl FakeScenes {
        fn with_scene_count(count: usize) -> Self {
            Self {
                names: (0..count).map(|i| format!("Scene {i}")).collect(),
                started: vec![],
            }
        }
    }

    impl SceneSwitching for FakeScenes {
        fn scene_names(&self) -> Vec<String> {
            self.names.clone()
        }

        fn start_transition(&mut self, scene_index: usize, duration_ms: u32) {
            self.started.push((scene_index, duration_ms));
        }
    }

    #[test]
    fn offsets_the_address_by_the_base_and_scales_the_duration() {
        let plan = trigger(true).plan(&cc(12, 50)).unwrap();
        assert_eq!(plan.scene_index, 2);
        assert_eq!(plan.duration_ms, 500);
    }

    #[test]
    fn addresses_below_the_base_are_not_ours() {
        assert_eq!(trigger(true).plan(&cc(9, 50)), None);
    }

    #[test]
    fn the_base_address_targets_the_first_scene() {
        assert_eq!(trigger(false).plan(&cc(10, 50)).unwrap().scene_index, 0);
    }

    #[test]
    fn without_scaling_the_duration_is_fixed() {
        assert_eq!(trigger(false).plan(&cc(12, 50)).unwrap().duration_ms, 1000);
    }

    #[test]
    fn values_above_one_hundred_extrapolate() {
        assert_eq!(trigger(true).plan(&cc(10, 127)).unwrap().duration_ms, 1270);
        assert_eq!(trigger(true).plan(&cc(10, 0)).unwrap().duration_ms, 0);
    }

    #[test]
    fn mismatched_kinds_are_ignored() {
        let event = ControlEvent {
            kind: EventKind::Note,
            address: 12,
            value: 50,
        };
        assert_eq!(trigger(true).plan(&event), None);
    }

    #[test]
    fn a_valid_plan_starts_a_transition() {
        let mut scenes = FakeScenes::with_scene_count(4);
        trigger(true).handle(&cc(12, 50), &mut scenes);
        assert_eq!(scenes.started, vec![(2, 500)]);
    }

    #[test]
    fn an_index_past_the_scene_list_starts_nothing() {
        let mut scenes = FakeScenes::with_scene_count(2);
        trigger(false).handle(&cc(12, 50), &mut scenes);
        assert!(scenes.started.is_empty());
    }

    #[test]
    fn the_last_scene_is_reachable() {
        let mut scenes = FakeScenes::with_scene_count(3);
        trigger(false).handle(&cc(12, 50), &mut scenes);
        assert_eq!(scenes.started, vec![(2, 1000)]);
    }
}

use bevy::prelude::*;

use crate::config::{CreditTimeline, ShotConfig, SimConfig};

/// One leg of the cinematic camera path.
#[derive(Debug, Clone)]
pub struct Shot {
    pub start: Vec3,
    pub end: Vec3,
    pub target: Vec3,
    pub duration: f32,
}

impl From<&ShotConfig> for Shot {
    fn from(config: &ShotConfig) -> Self {
        Self {
            start: Vec3::from_array(config.start),
            end: Vec3::from_array(config.end),
            target: Vec3::from_array(config.target),
            // A zero duration would stall the playback forever.
            duration: config.duration.max(0.01),
        }
    }
}

/// Where the sequencer wants the camera this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ShotPlayback,
    Finale,
}

/// Actions on the finale timeline, scheduled relative to finale start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineAction {
    /// Show credit line 2, 3 or 4 (earlier lines fade out).
    CreditStep(u8),
    /// Credits end, the closing greeting appears.
    Greeting,
    /// The whole sequence is over.
    Finished,
}

/// Fade state for the finale text, greeting and the three credit lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Opacities {
    pub finale_text: f32,
    pub greeting: f32,
    pub credits: [f32; 3],
}

/// What one tick produced.
#[derive(Debug, Default, PartialEq)]
pub struct TickOutput {
    pub fired: Vec<TimelineAction>,
    /// True on the tick the 61s mark passes; never true again afterwards.
    pub finished: bool,
    /// Set when the exit-allowed flag flipped this tick.
    pub can_exit_changed: Option<bool>,
}

/// Shot playback and finale timeline driver.
///
/// Owns its schedule as a sorted `(fire_time, action)` list polled against
/// elapsed time each frame, so aborting the sequence is just clearing the
/// list; nothing can fire late into a restarted run.
#[derive(Resource, Default)]
pub struct Sequencer {
    shots: Vec<Shot>,
    timeline: CreditTimeline,
    text_fade_rate: f32,
    credit_fade_rate: f32,

    phase: Phase,
    shot_index: usize,
    shot_elapsed: f32,
    finale_elapsed: f32,
    schedule: Vec<(f32, TimelineAction)>,

    pub credit_step: u8,
    pub greeting: bool,
    pub can_exit: bool,
    pub opacity: Opacities,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::ShotPlayback
    }
}

impl Sequencer {
    /// Full restart from config: shot 0, progress 0, no pending schedule,
    /// opacities at zero.
    pub fn restart(&mut self, config: &SimConfig) {
        self.shots = config.shots.iter().map(Shot::from).collect();
        self.timeline = config.credits.clone();
        self.text_fade_rate = config.text_fade_rate;
        self.credit_fade_rate = config.credit_fade_rate;
        self.clear();
    }

    /// Cancels everything pending and resets the presentation state.
    pub fn clear(&mut self) {
        self.phase = Phase::ShotPlayback;
        self.shot_index = 0;
        self.shot_elapsed = 0.0;
        self.finale_elapsed = 0.0;
        self.schedule.clear();
        self.credit_step = 0;
        self.greeting = false;
        self.can_exit = false;
        self.opacity = Opacities::default();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn shot_index(&self) -> usize {
        self.shot_index
    }

    /// Progress through the active shot in [0, 1].
    pub fn progress(&self) -> f32 {
        match self.phase {
            Phase::Finale => 1.0,
            Phase::ShotPlayback => match self.shots.get(self.shot_index) {
                Some(shot) => (self.shot_elapsed / shot.duration).clamp(0.0, 1.0),
                None => 0.0,
            },
        }
    }

    pub fn pending_actions(&self) -> usize {
        self.schedule.len()
    }

    /// Advances the sequence by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutput {
        let mut output = TickOutput::default();
        if self.shots.is_empty() {
            return output;
        }

        match self.phase {
            Phase::ShotPlayback => {
                self.shot_elapsed += dt;
                let last = self.shots.len() - 1;
                // Advance on completion without carrying overshoot time.
                if self.progress() >= 1.0 && self.shot_index < last {
                    self.shot_index += 1;
                    self.shot_elapsed = 0.0;
                }
                if self.shot_index == last && self.progress() >= 0.99 {
                    self.begin_finale();
                }
            }
            Phase::Finale => {
                self.finale_elapsed += dt;
                while self
                    .schedule
                    .first()
                    .is_some_and(|(time, _)| *time <= self.finale_elapsed)
                {
                    let (_, action) = self.schedule.remove(0);
                    self.apply(action, &mut output);
                }
            }
        }

        self.fade_step();
        output
    }

    /// Camera transform for this frame; the sequencer always has one while
    /// it owns the camera (the final shot holds at its end).
    pub fn camera_pose(&self) -> Option<CameraPose> {
        let shot = self.shots.get(match self.phase {
            Phase::Finale => self.shots.len().checked_sub(1)?,
            Phase::ShotPlayback => self.shot_index,
        })?;
        Some(CameraPose {
            position: shot.start.lerp(shot.end, self.progress()),
            look_at: shot.target,
        })
    }

    /// Builds the credit schedule exactly once, at finale start.
    fn begin_finale(&mut self) {
        self.phase = Phase::Finale;
        self.finale_elapsed = 0.0;
        self.schedule = vec![
            (self.timeline.contact, TimelineAction::CreditStep(2)),
            (self.timeline.thanks, TimelineAction::CreditStep(3)),
            (self.timeline.dedication, TimelineAction::CreditStep(4)),
            (self.timeline.greeting, TimelineAction::Greeting),
            (self.timeline.finished, TimelineAction::Finished),
        ];
        self.schedule
            .sort_by(|(a, _), (b, _)| a.total_cmp(b));
    }

    fn apply(&mut self, action: TimelineAction, output: &mut TickOutput) {
        match action {
            TimelineAction::CreditStep(step) => {
                self.credit_step = step;
                // Exit becomes possible once the credits begin.
                if !self.can_exit {
                    self.can_exit = true;
                    output.can_exit_changed = Some(true);
                }
            }
            TimelineAction::Greeting => {
                self.credit_step = 0;
                self.greeting = true;
            }
            TimelineAction::Finished => output.finished = true,
        }
        output.fired.push(action);
    }

    /// One frame of exponential convergence for every fade. The finale text
    /// yields to whichever credit/greeting currently overrides it.
    fn fade_step(&mut self) {
        let finale_visible =
            self.phase == Phase::Finale && !self.greeting && self.credit_step == 0;
        let approach = |value: &mut f32, target: f32, rate: f32| {
            *value += (target - *value) * rate;
        };

        approach(
            &mut self.opacity.finale_text,
            if finale_visible { 1.0 } else { 0.0 },
            self.text_fade_rate,
        );
        approach(
            &mut self.opacity.greeting,
            if self.greeting { 1.0 } else { 0.0 },
            self.text_fade_rate,
        );
        for index in 0..3 {
            let target = if self.credit_step == index as u8 + 2 {
                1.0
            } else {
                0.0
            };
            approach(&mut self.opacity.credits[index], target, self.credit_fade_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn sequencer() -> Sequencer {
        let mut sequencer = Sequencer::default();
        sequencer.restart(&SimConfig::default());
        sequencer
    }

    #[test]
    fn starts_at_shot_zero_with_no_pending_timers() {
        let sequencer = sequencer();
        assert_eq!(sequencer.shot_index(), 0);
        assert_eq!(sequencer.progress(), 0.0);
        assert_eq!(sequencer.pending_actions(), 0);
    }

    #[test]
    fn shot_progress_is_monotonic_and_hits_boundaries() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        let shot0 = &config.shots[0];

        let pose = sequencer.camera_pose().unwrap();
        assert!(pose.position.distance(Vec3::from_array(shot0.start)) < EPS);

        let mut previous = 0.0;
        for _ in 0..100 {
            sequencer.tick(shot0.duration / 200.0);
            assert!(sequencer.progress() >= previous);
            previous = sequencer.progress();
        }
        assert_eq!(sequencer.shot_index(), 0);
    }

    #[test]
    fn shot_transition_resets_progress_without_carrying_overshoot() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();

        // Elapse exactly shot 0's duration.
        sequencer.tick(config.shots[0].duration);
        assert_eq!(sequencer.shot_index(), 1);
        assert!(sequencer.progress() < EPS);

        let pose = sequencer.camera_pose().unwrap();
        assert!(pose.position.distance(Vec3::from_array(config.shots[1].start)) < EPS);
        assert!(pose.look_at.distance(Vec3::from_array(config.shots[1].target)) < EPS);
    }

    #[test]
    fn final_shot_holds_at_its_end() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        for shot in &config.shots {
            sequencer.tick(shot.duration + 1.0);
        }
        assert_eq!(sequencer.phase(), Phase::Finale);

        let end = Vec3::from_array(config.shots.last().unwrap().end);
        for _ in 0..10 {
            sequencer.tick(0.5);
            let pose = sequencer.camera_pose().unwrap();
            assert!(pose.position.distance(end) < EPS);
        }
    }

    #[test]
    fn finale_timeline_fires_each_action_once_in_order() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        for shot in &config.shots {
            sequencer.tick(shot.duration + 1.0);
        }
        assert_eq!(sequencer.pending_actions(), 5);

        let mut fired = Vec::new();
        let mut finished_count = 0;
        // 70 simulated seconds at 10 Hz.
        for _ in 0..700 {
            let output = sequencer.tick(0.1);
            fired.extend(output.fired);
            if output.finished {
                finished_count += 1;
            }
        }

        assert_eq!(
            fired,
            vec![
                TimelineAction::CreditStep(2),
                TimelineAction::CreditStep(3),
                TimelineAction::CreditStep(4),
                TimelineAction::Greeting,
                TimelineAction::Finished,
            ]
        );
        assert_eq!(finished_count, 1);
        assert_eq!(sequencer.pending_actions(), 0);
        assert!(sequencer.greeting);
    }

    #[test]
    fn exit_allowed_only_once_credits_begin() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        for shot in &config.shots {
            sequencer.tick(shot.duration + 1.0);
        }
        assert!(!sequencer.can_exit);

        // Just before the first credit.
        let output = sequencer.tick(config.credits.contact - 0.5);
        assert_eq!(output.can_exit_changed, None);
        assert!(!sequencer.can_exit);

        let output = sequencer.tick(1.0);
        assert_eq!(output.can_exit_changed, Some(true));
        assert!(sequencer.can_exit);
    }

    #[test]
    fn finale_text_yields_to_credits() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        for shot in &config.shots {
            sequencer.tick(shot.duration + 1.0);
        }

        // Before the credits the finale text fades in.
        for _ in 0..50 {
            sequencer.tick(0.05);
        }
        assert!(sequencer.opacity.finale_text > 0.3);
        assert!(sequencer.opacity.credits[0] < EPS);

        // Jump past the first credit mark; the override flips the targets.
        sequencer.tick(config.credits.contact);
        let before = sequencer.opacity.finale_text;
        for _ in 0..50 {
            sequencer.tick(0.05);
        }
        assert!(sequencer.opacity.finale_text < before);
        assert!(sequencer.opacity.credits[0] > 0.3);
    }

    #[test]
    fn clear_cancels_schedule_and_resets_opacities() {
        let mut sequencer = sequencer();
        let config = SimConfig::default();
        for shot in &config.shots {
            sequencer.tick(shot.duration + 1.0);
        }
        sequencer.tick(config.credits.contact + 1.0);
        assert!(sequencer.can_exit);
        assert!(sequencer.pending_actions() > 0);

        sequencer.clear();
        assert_eq!(sequencer.pending_actions(), 0);
        assert_eq!(sequencer.opacity, Opacities::default());
        assert!(!sequencer.can_exit);
        assert_eq!(sequencer.shot_index(), 0);
        assert_eq!(sequencer.phase(), Phase::ShotPlayback);

        // A fresh run does not inherit anything from the aborted one.
        let output = sequencer.tick(0.1);
        assert!(output.fired.is_empty());
    }
}

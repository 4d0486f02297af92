//! Live update loop.
//!
//! One task owns the [`Widget`]. Every second it recomputes the pay-cycle
//! snapshot and the session counter; between ticks it only redraws while the
//! displayed numbers ease towards their new values. The task ends on reset,
//! on quit, or when its [`TickerHandle`] is dropped.

use chrono::NaiveDateTime;
use log::{debug, warn};
use salary_accrual::{SmoothedValue, Widget, WidgetView};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Requests delivered to a running ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Reset,
    ToggleLanguage,
    Quit,
}

/// Why a ticker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Configuration discarded, go back to setup
    Reset,
    Quit,
}

/// What the refresh callback gets to draw.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub view: WidgetView<'a>,
    /// Displayed monthly counter, possibly mid-glide
    pub earned: f64,
    /// Displayed session counter, possibly mid-glide
    pub session_earned: f64,
    pub session_elapsed: Duration,
    pub wall: NaiveDateTime,
    /// Number of completed ticks
    pub tick: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct TickerOptions {
    /// Redraw cadence between ticks; `None` disables easing
    pub frame_interval: Option<Duration>,
}

impl Default for TickerOptions {
    fn default() -> Self {
        Self {
            frame_interval: Some(Duration::from_millis(50)),
        }
    }
}

pub struct TickerHandle {
    control: mpsc::Sender<Control>,
    task: Option<JoinHandle<(Widget, Outcome)>>,
}

impl TickerHandle {
    /// Sends a control request. Returns false once the ticker has stopped.
    pub async fn send(&self, control: Control) -> bool {
        self.control.send(control).await.is_ok()
    }

    /// A sender that can be moved into input readers.
    pub fn controller(&self) -> mpsc::Sender<Control> {
        self.control.clone()
    }

    /// Waits for the ticker to finish on its own (reset or quit).
    ///
    /// Cancel safe: dropping the future leaves the ticker running.
    pub async fn wait(&mut self) -> anyhow::Result<(Widget, Outcome)> {
        let task = self
            .task
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Ticker already stopped"))?;
        let joined = task.await;
        self.task = None;
        Ok(joined?)
    }

    /// Stops the ticker and hands back the widget.
    pub async fn stop(mut self) -> anyhow::Result<Widget> {
        let _ = self.control.send(Control::Quit).await;
        let (widget, _) = self.wait().await?;
        Ok(widget)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Ticker handle dropped, aborting update loop");
            task.abort();
        }
    }
}

/// Starts the update loop for an already confirmed widget.
///
/// `wall_clock` supplies local wall-clock time for the pay cycle;
/// `on_refresh` is called after every tick and every redraw.
pub fn spawn<W, F>(
    widget: Widget,
    options: TickerOptions,
    wall_clock: W,
    on_refresh: F,
) -> TickerHandle
where
    W: Fn() -> NaiveDateTime + Send + 'static,
    F: FnMut(&Frame<'_>) + Send + 'static,
{
    let (control, control_rx) = mpsc::channel(8);
    let task = tokio::spawn(run(widget, options, wall_clock, control_rx, on_refresh));
    TickerHandle {
        control,
        task: Some(task),
    }
}

struct Display {
    earned: SmoothedValue,
    session: SmoothedValue,
}

impl Display {
    fn new(widget: &Widget, now: std::time::Instant, options: &TickerOptions) -> Self {
        let (earned, session) = widget
            .view()
            .map(|view| (view.snapshot.earned, view.session_earned))
            .unwrap_or_default();
        // A zero duration snaps straight to each new target
        let duration = match options.frame_interval {
            Some(_) => salary_accrual::SMOOTHING_DURATION,
            None => Duration::ZERO,
        };
        Self {
            earned: SmoothedValue::with_duration(earned, now, duration),
            session: SmoothedValue::with_duration(session, now, duration),
        }
    }

    fn retarget(&mut self, widget: &Widget, now: std::time::Instant) {
        if let Some(view) = widget.view() {
            self.earned.retarget(view.snapshot.earned, now);
            self.session.retarget(view.session_earned, now);
        }
    }

    fn is_settled(&self, now: std::time::Instant) -> bool {
        self.earned.is_settled(now) && self.session.is_settled(now)
    }
}

async fn run<W, F>(
    mut widget: Widget,
    options: TickerOptions,
    wall_clock: W,
    mut control_rx: mpsc::Receiver<Control>,
    mut on_refresh: F,
) -> (Widget, Outcome)
where
    W: Fn() -> NaiveDateTime + Send + 'static,
    F: FnMut(&Frame<'_>) + Send + 'static,
{
    let mut ticks = interval(TICK_INTERVAL);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let frame_interval = options.frame_interval.unwrap_or(TICK_INTERVAL);
    let mut frames = interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut display = Display::new(&widget, Instant::now().into_std(), &options);
    let mut tick_count: u64 = 0;
    let mut wall = wall_clock();

    let mut refresh = |widget: &Widget, display: &Display, wall: NaiveDateTime, tick: u64| {
        let Some(view) = widget.view() else {
            return;
        };
        let now = Instant::now().into_std();
        on_refresh(&Frame {
            earned: display.earned.value_at(now),
            session_earned: display.session.value_at(now),
            session_elapsed: view.session.elapsed(now),
            wall,
            tick,
            view,
        });
    };

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let now = Instant::now().into_std();
                wall = wall_clock();
                match widget.tick(wall, now) {
                    Ok(true) => {
                        tick_count += 1;
                        display.retarget(&widget, now);
                    }
                    Ok(false) => return (widget, Outcome::Reset),
                    Err(e) => warn!("Skipping tick: {}", e),
                }
                refresh(&widget, &display, wall, tick_count);
            }
            _ = frames.tick(), if options.frame_interval.is_some() => {
                if !display.is_settled(Instant::now().into_std()) {
                    refresh(&widget, &display, wall, tick_count);
                }
            }
            control = control_rx.recv() => match control {
                Some(Control::Reset) => {
                    widget.reset();
                    return (widget, Outcome::Reset);
                }
                Some(Control::ToggleLanguage) => {
                    widget.toggle_language();
                    refresh(&widget, &display, wall, tick_count);
                }
                Some(Control::Quit) | None => return (widget, Outcome::Quit),
            },
        }
    }
}

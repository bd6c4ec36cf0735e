use crate::format::{format_currency, format_number, format_percent};
use crate::models::Summary;
use crate::page::{Page, WidgetId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterTiming {
    pub start_delay: Duration,
    pub duration: Duration,
    pub step_interval: Duration,
}

impl Default for CounterTiming {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(500),
            duration: Duration::from_millis(2000),
            step_interval: Duration::from_millis(25),
        }
    }
}

impl CounterTiming {
    pub fn step_count(&self) -> u32 {
        let interval = self.step_interval.as_millis().max(1);
        (self.duration.as_millis() / interval).max(1) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Increment {
    Ceil,
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Number,
    Currency,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricCounter {
    widget: WidgetId,
    current: f64,
    target: f64,
    increment: Increment,
    style: Style,
}

impl MetricCounter {
    fn new(widget: WidgetId, target: f64, increment: Increment, style: Style) -> Self {
        Self {
            widget,
            current: 0.0,
            target,
            increment,
            style,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    fn per_step(&self, steps: u32) -> f64 {
        let raw = self.target / f64::from(steps);
        match self.increment {
            Increment::Ceil => raw.ceil(),
            Increment::Exact => raw,
        }
    }

    pub fn formatted(&self) -> String {
        match self.style {
            Style::Number => format_number(self.current as u64),
            Style::Currency => format_currency(self.current as u64),
            Style::Percent => format_percent(self.current),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Done,
}

#[derive(Debug, Clone)]
pub struct CounterSequencer {
    step: u32,
    steps: u32,
    counters: [MetricCounter; 4],
}

impl CounterSequencer {
    pub fn new(summary: &Summary, steps: u32) -> Self {
        Self {
            step: 0,
            steps: steps.max(1),
            counters: [
                MetricCounter::new(
                    WidgetId::TotalUsers,
                    summary.total_users as f64,
                    Increment::Ceil,
                    Style::Number,
                ),
                MetricCounter::new(
                    WidgetId::Revenue,
                    summary.revenue as f64,
                    Increment::Ceil,
                    Style::Currency,
                ),
                MetricCounter::new(
                    WidgetId::Engagement,
                    f64::from(summary.engagement_percent),
                    Increment::Exact,
                    Style::Percent,
                ),
                MetricCounter::new(
                    WidgetId::NewOrders,
                    summary.new_orders as f64,
                    Increment::Ceil,
                    Style::Number,
                ),
            ],
        }
    }

    pub fn steps_taken(&self) -> u32 {
        self.step
    }

    pub fn step_count(&self) -> u32 {
        self.steps
    }

    pub fn counters(&self) -> &[MetricCounter] {
        &self.counters
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.steps
    }

    // Advances every unfinished counter by one increment and writes it out.
    // On the last step any counter still short of its target lands on it.
    pub fn step(&mut self, page: &mut Page) -> StepOutcome {
        if self.is_done() {
            return StepOutcome::Done;
        }
        self.step += 1;
        let last = self.step >= self.steps;
        let steps = self.steps;

        for counter in &mut self.counters {
            if counter.current < counter.target {
                let next = if last {
                    counter.target
                } else {
                    counter.current + counter.per_step(steps)
                };
                counter.current = next.min(counter.target);
                page.set_text(counter.widget, counter.formatted());
            }
        }

        if last {
            StepOutcome::Done
        } else {
            StepOutcome::Continue
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEnd {
    Completed { steps: u32 },
    Stopped { steps: u32 },
}

pub struct SequencerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<SequenceEnd>,
}

impl SequencerHandle {
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Option<SequenceEnd> {
        self.task.await.ok()
    }
}

pub trait CounterSurface: Send + 'static {
    fn summary(&self) -> Summary;
    fn page_mut(&mut self) -> &mut Page;
}

pub fn spawn_sequencer<S: CounterSurface>(
    target: Arc<Mutex<S>>,
    timing: CounterTiming,
) -> SequencerHandle {
    let (stop, mut stopped) = watch::channel(false);
    let task = tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timing.start_delay) => {}
            _ = stop_requested(&mut stopped) => {
                debug!("counter stopped before start");
                return SequenceEnd::Stopped { steps: 0 };
            }
        }

        let summary = target.lock().await.summary();
        let mut sequencer = CounterSequencer::new(&summary, timing.step_count());
        let mut ticker = tokio::time::interval(timing.step_interval.max(Duration::from_millis(1)));
        info!(steps = sequencer.step_count(), "counter animation started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop_requested(&mut stopped) => {
                    let steps = sequencer.steps_taken();
                    info!(steps, "counter animation stopped");
                    return SequenceEnd::Stopped { steps };
                }
            }

            let outcome = {
                let mut guard = target.lock().await;
                sequencer.step(guard.page_mut())
            };
            if outcome == StepOutcome::Done {
                let steps = sequencer.steps_taken();
                info!(steps, "counter animation finished");
                return SequenceEnd::Completed { steps };
            }
        }
    });

    SequencerHandle { stop, task }
}

// Resolves once a stop is sent. A dropped handle detaches the task instead.
async fn stop_requested(stopped: &mut watch::Receiver<bool>) {
    loop {
        if stopped.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if *stopped.borrow() {
            return;
        }
    }
}

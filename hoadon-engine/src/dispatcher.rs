//! Print dispatcher
//!
//! Walks an ordered chain of (renderer, channel) steps. The first step
//! whose render and handoff both return `Ok` ends the walk; anything else
//! is recorded and the next step is tried. Each channel is invoked at most
//! once per print and nothing is retried: a handoff that was accepted but
//! never printed looks exactly like success from here.

use std::fmt;

use hoadon_printer::{
    Channel, ChannelError, EncodingError, Host, OutputFormat, PrintSurfaceChannel,
    RawBtBase64Channel, RawBtTextChannel,
};
use shared::{AppSettings, Invoice};
use tracing::{debug, error, info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{PrintError, PrintResult};
use crate::renderer::{EscPosRenderer, MarkupRenderer, Renderer, TextRenderer};

/// Where a dispatch stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Rendering,
    Dispatching,
    /// Taken by the first step of the chain
    Delivered,
    /// Taken by a later step after earlier ones failed or were skipped
    Fallback,
    /// Every step failed
    Failed,
}

/// One renderer paired with the channel that carries its output
pub struct ChainStep {
    renderer: Box<dyn Renderer>,
    channel: Box<dyn Channel>,
}

impl ChainStep {
    /// Pair a renderer with a channel; the formats must agree
    pub fn new(renderer: Box<dyn Renderer>, channel: Box<dyn Channel>) -> PrintResult<Self> {
        if renderer.format() != channel.format() {
            return Err(PrintError::ChainMismatch {
                channel: channel.name(),
                expected: channel.format(),
                got: renderer.format(),
            });
        }
        Ok(Self { renderer, channel })
    }

    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    pub fn format(&self) -> OutputFormat {
        self.channel.format()
    }
}

impl fmt::Debug for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainStep")
            .field("channel", &self.channel.name())
            .field("format", &self.format())
            .finish()
    }
}

/// Ordered fallback chain
#[derive(Debug, Default)]
pub struct PrintChain {
    steps: Vec<ChainStep>,
}

impl PrintChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// ESC/POS to the print handler, then plain text to the same handler,
    /// then HTML on the print surface
    pub fn standard(config: &EngineConfig) -> Self {
        Self {
            steps: vec![
                ChainStep {
                    renderer: Box::new(EscPosRenderer::new(config)),
                    channel: Box::new(RawBtBase64Channel),
                },
                ChainStep {
                    renderer: Box::new(TextRenderer::new()),
                    channel: Box::new(RawBtTextChannel),
                },
                surface_step(config),
            ],
        }
    }

    /// HTML on the print surface only
    pub fn surface_only(config: &EngineConfig) -> Self {
        Self {
            steps: vec![surface_step(config)],
        }
    }

    /// Append a step
    pub fn push(&mut self, step: ChainStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn surface_step(config: &EngineConfig) -> ChainStep {
    ChainStep {
        renderer: Box::new(MarkupRenderer::new(config)),
        channel: Box::new(PrintSurfaceChannel::new(config.settle)),
    }
}

/// What happened at one step
#[derive(Debug)]
pub enum AttemptOutcome {
    Delivered,
    /// Channel needs a print handler the host does not have
    Skipped,
    RenderFailed(EncodingError),
    ChannelFailed(ChannelError),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Delivered => f.write_str("delivered"),
            AttemptOutcome::Skipped => f.write_str("skipped, no print handler"),
            AttemptOutcome::RenderFailed(e) => write!(f, "render failed: {}", e),
            AttemptOutcome::ChannelFailed(e) => write!(f, "channel failed: {}", e),
        }
    }
}

/// Record of one step
#[derive(Debug)]
pub struct Attempt {
    pub channel: &'static str,
    pub format: OutputFormat,
    pub outcome: AttemptOutcome,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.channel, self.format, self.outcome)
    }
}

/// Successful dispatch
#[derive(Debug)]
pub struct Delivery {
    /// Channel that took the receipt
    pub channel: &'static str,
    pub format: OutputFormat,
    /// Every step tried, the delivering one last
    pub attempts: Vec<Attempt>,
}

impl Delivery {
    /// Whether an earlier step was passed over
    pub fn fell_back(&self) -> bool {
        self.attempts.len() > 1
    }
}

/// Runs a [`PrintChain`] against a [`Host`]
#[derive(Debug)]
pub struct PrintDispatcher {
    chain: PrintChain,
    state: DispatchState,
}

impl PrintDispatcher {
    pub fn new(chain: PrintChain) -> Self {
        Self {
            chain,
            state: DispatchState::Idle,
        }
    }

    /// State after the last [`dispatch`](Self::dispatch)
    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn chain(&self) -> &PrintChain {
        &self.chain
    }

    /// Walk the chain once
    ///
    /// Rendering happens per step, only when the step is reached. A render
    /// error skips that step's channel; a channel error moves on. When no
    /// step delivers, [`PrintError::Exhausted`] carries every attempt.
    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number, steps = self.chain.len()))]
    pub fn dispatch(
        &mut self,
        host: &dyn Host,
        invoice: &Invoice,
        settings: &AppSettings,
    ) -> PrintResult<Delivery> {
        self.state = DispatchState::Idle;
        let handoff = host.supports_handoff();
        info!(handoff, "print dispatch started");

        let mut attempts = Vec::with_capacity(self.chain.len());
        for (index, step) in self.chain.steps.iter().enumerate() {
            let channel = step.channel.name();
            let format = step.format();

            if step.channel.requires_handoff() && !handoff {
                debug!(channel, "no print handler, step skipped");
                attempts.push(Attempt {
                    channel,
                    format,
                    outcome: AttemptOutcome::Skipped,
                });
                continue;
            }

            self.state = DispatchState::Rendering;
            let output = match step.renderer.render(invoice, settings) {
                Ok(output) => output,
                Err(e) => {
                    warn!(channel, %format, error = %e, "render failed, trying next channel");
                    attempts.push(Attempt {
                        channel,
                        format,
                        outcome: AttemptOutcome::RenderFailed(e),
                    });
                    continue;
                }
            };

            self.state = DispatchState::Dispatching;
            match step.channel.deliver(host, &output) {
                Ok(()) => {
                    attempts.push(Attempt {
                        channel,
                        format,
                        outcome: AttemptOutcome::Delivered,
                    });
                    self.state = if index == 0 {
                        DispatchState::Delivered
                    } else {
                        DispatchState::Fallback
                    };
                    info!(channel, %format, bytes = output.len(), "receipt handed off");
                    return Ok(Delivery {
                        channel,
                        format,
                        attempts,
                    });
                }
                Err(e) => {
                    warn!(channel, %format, error = %e, "channel failed, trying next channel");
                    attempts.push(Attempt {
                        channel,
                        format,
                        outcome: AttemptOutcome::ChannelFailed(e),
                    });
                }
            }
        }

        self.state = DispatchState::Failed;
        error!(attempts = attempts.len(), "all print channels failed");
        Err(PrintError::Exhausted { attempts })
    }
}

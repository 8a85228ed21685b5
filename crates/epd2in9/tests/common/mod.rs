//! Recording fakes of the embedded-hal traits.
//!
//! Every pin write, SPI byte, busy read and delay lands in one shared event
//! log so tests can check ordering across lines.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use epd2in9::{Config, Display, Interface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
    Busy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    Spi(u8),
    Flush,
    BusyRead(bool),
    DelayMs(u32),
    DelayNs(u32),
}

/// Byte as seen by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tx {
    Command(u8),
    Data(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FakeError;

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl spi::Error for FakeError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

#[derive(Default)]
struct Bench {
    events: Vec<Event>,
    busy_script: VecDeque<bool>,
    stuck_busy: bool,
    spi_fails: bool,
    failing_pins: Vec<Line>,
}

/// Handle on the shared log, kept by the test
#[derive(Clone, Default)]
pub struct Probe {
    bench: Rc<RefCell<Bench>>,
}

impl Probe {
    fn push(&self, event: Event) {
        self.bench.borrow_mut().events.push(event);
    }

    /// Busy levels returned by the next reads, idle once exhausted
    pub fn script_busy(&self, levels: &[bool]) {
        self.bench.borrow_mut().busy_script.extend(levels);
    }

    /// Report busy forever once the script is exhausted
    pub fn stick_busy(&self, stuck: bool) {
        self.bench.borrow_mut().stuck_busy = stuck;
    }

    pub fn fail_spi(&self, fail: bool) {
        self.bench.borrow_mut().spi_fails = fail;
    }

    /// Make every access to `line` fail, or succeed again
    pub fn fail_pin(&self, line: Line, fail: bool) {
        let mut bench = self.bench.borrow_mut();
        bench.failing_pins.retain(|&l| l != line);
        if fail {
            bench.failing_pins.push(line);
        }
    }

    fn pin_fails(&self, line: Line) -> bool {
        self.bench.borrow().failing_pins.contains(&line)
    }

    pub fn events(&self) -> Vec<Event> {
        self.bench.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.bench.borrow_mut().events.clear();
    }

    /// SPI bytes tagged with the DC level they were sent under
    pub fn transactions(&self) -> Vec<Tx> {
        let mut dc = false;
        let mut out = Vec::new();
        for event in self.events() {
            match event {
                Event::Set(Line::Dc, level) => dc = level,
                Event::Spi(byte) if dc => out.push(Tx::Data(byte)),
                Event::Spi(byte) => out.push(Tx::Command(byte)),
                _ => {}
            }
        }
        out
    }

    /// Commands with the data bytes that followed each
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for tx in self.transactions() {
            match tx {
                Tx::Command(cmd) => out.push((cmd, Vec::new())),
                Tx::Data(byte) => out
                    .last_mut()
                    .expect("data byte before any command")
                    .1
                    .push(byte),
            }
        }
        out
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    pub fn busy_reads(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::BusyRead(_)))
            .count()
    }
}

pub struct FakePin {
    line: Line,
    probe: Probe,
}

impl digital::ErrorType for FakePin {
    type Error = FakeError;
}

impl FakePin {
    fn set(&mut self, level: bool) -> Result<(), FakeError> {
        if self.probe.pin_fails(self.line) {
            return Err(FakeError);
        }
        self.probe.push(Event::Set(self.line, level));
        Ok(())
    }
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub struct FakeBusy {
    probe: Probe,
}

impl FakeBusy {
    fn read(&mut self) -> Result<bool, FakeError> {
        if self.probe.pin_fails(Line::Busy) {
            return Err(FakeError);
        }
        let level = {
            let mut bench = self.probe.bench.borrow_mut();
            let stuck = bench.stuck_busy;
            bench.busy_script.pop_front().unwrap_or(stuck)
        };
        self.probe.push(Event::BusyRead(level));
        Ok(level)
    }
}

impl digital::ErrorType for FakeBusy {
    type Error = FakeError;
}

impl InputPin for FakeBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|level| !level)
    }
}

pub struct FakeSpi {
    probe: Probe,
}

impl spi::ErrorType for FakeSpi {
    type Error = FakeError;
}

impl SpiBus for FakeSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        if self.probe.bench.borrow().spi_fails {
            return Err(FakeError);
        }
        for &byte in words {
            self.probe.push(Event::Spi(byte));
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let copy = words.to_vec();
        words.fill(0);
        self.write(&copy)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.probe.push(Event::Flush);
        Ok(())
    }
}

pub struct FakeDelay {
    probe: Probe,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.probe.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.probe.push(Event::DelayMs(ms));
    }
}

pub type TestInterface = Interface<FakeSpi, FakePin, FakePin, FakePin, FakeBusy>;

pub fn interface() -> (Probe, TestInterface, FakeDelay) {
    let probe = Probe::default();
    let pin = |line| FakePin {
        line,
        probe: probe.clone(),
    };
    let interface = Interface::new(
        FakeSpi {
            probe: probe.clone(),
        },
        pin(Line::Cs),
        pin(Line::Dc),
        pin(Line::Rst),
        FakeBusy {
            probe: probe.clone(),
        },
    );
    let delay = FakeDelay {
        probe: probe.clone(),
    };
    (probe, interface, delay)
}

pub fn display_with(config: Config) -> (Probe, Display<TestInterface>, FakeDelay) {
    let (probe, interface, delay) = interface();
    (probe, Display::new(interface, config), delay)
}

pub fn display() -> (Probe, Display<TestInterface>, FakeDelay) {
    display_with(Config::default())
}

/// Initialized display with an empty log
pub fn ready_display() -> (Probe, Display<TestInterface>, FakeDelay) {
    let (probe, mut display, mut delay) = display();
    display.init(&mut delay).unwrap();
    probe.clear_events();
    (probe, display, delay)
}

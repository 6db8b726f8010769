//! Recording fake board for handler tests

use std::vec::Vec;

use heapless::Deque;

use crate::traits::{
    DisplayDriver, LampDriver, NvAddress, NvStorage, SolenoidDriver, SwitchId, SwitchSource,
};

/// One collaborator call, in the order it was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Display(u8, u32, bool),
    Blank(u8, u8),
    Credits(u8, bool),
    BallInPlay(u8, bool),
    Cycle(u32, u8),
    LampsOff,
    Lamp(u8),
    SolenoidsOn,
    SolenoidsOff,
    Flippers(bool),
    CoinLockout(bool),
    Fire(u8, u8),
    WriteByte(u16, u8),
    WriteU32(u16, u32),
}

/// Storage failure injected by a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broken;

pub struct FakeBoard {
    pub pending: Deque<SwitchId, 16>,
    pub closed: [bool; 128],
    pub nv: [u8; 64],
    pub broken_storage: bool,
    pub calls: Vec<Call>,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            pending: Deque::new(),
            closed: [false; 128],
            nv: [0; 64],
            broken_storage: false,
            calls: Vec::new(),
        }
    }

    /// Queue a closure and leave the switch closed
    pub fn close(&mut self, switch: SwitchId) {
        self.pending.push_back(switch).unwrap();
        self.closed[switch.as_u8() as usize] = true;
    }

    pub fn open(&mut self, switch: SwitchId) {
        self.closed[switch.as_u8() as usize] = false;
    }

    /// Queue a closure without holding the switch
    pub fn tap(&mut self, switch: SwitchId) {
        self.pending.push_back(switch).unwrap();
    }

    pub fn store_u32(&mut self, address: NvAddress, value: u32) {
        let start = address.as_u16() as usize;
        self.nv[start..start + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn stored_u32(&self, address: NvAddress) -> u32 {
        let start = address.as_u16() as usize;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.nv[start..start + 4]);
        u32::from_le_bytes(bytes)
    }

    /// Last value shown on a player display
    pub fn shown(&self, position: u8) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match *c {
            Call::Display(p, v, _) if p == position => Some(v),
            _ => None,
        })
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .iter()
            .copied()
            .filter(|c| matches!(c, Call::WriteByte(..) | Call::WriteU32(..)))
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SwitchSource for FakeBoard {
    fn pull_next_switch(&mut self) -> Option<SwitchId> {
        self.pending.pop_front()
    }

    fn is_switch_active(&self, switch: SwitchId) -> bool {
        self.closed[switch.as_u8() as usize]
    }
}

impl LampDriver for FakeBoard {
    fn turn_off_all_lamps(&mut self) {
        self.calls.push(Call::LampsOff);
    }

    fn set_lamp_state(&mut self, lamp: u8, on: bool, _dim: u8, flash_period_ms: u16) {
        assert!(on);
        assert_eq!(flash_period_ms, 500);
        self.calls.push(Call::Lamp(lamp));
    }
}

impl DisplayDriver for FakeBoard {
    fn set_display(&mut self, position: u8, value: u32, blank_leading_zeros: bool) {
        self.calls.push(Call::Display(position, value, blank_leading_zeros));
    }

    fn set_display_blank(&mut self, position: u8, mask: u8) {
        self.calls.push(Call::Blank(position, mask));
    }

    fn set_display_credits(&mut self, value: u8, show: bool) {
        self.calls.push(Call::Credits(value, show));
    }

    fn set_display_ball_in_play(&mut self, value: u8, show: bool) {
        self.calls.push(Call::BallInPlay(value, show));
    }

    fn cycle_all_displays(&mut self, now_ms: u32, pattern: u8) {
        self.calls.push(Call::Cycle(now_ms, pattern));
    }
}

impl SolenoidDriver for FakeBoard {
    fn enable_solenoid_stack(&mut self) {
        self.calls.push(Call::SolenoidsOn);
    }

    fn disable_solenoid_stack(&mut self) {
        self.calls.push(Call::SolenoidsOff);
    }

    fn set_disable_flippers(&mut self, disabled: bool) {
        self.calls.push(Call::Flippers(disabled));
    }

    fn set_coin_lockout(&mut self, locked: bool) {
        self.calls.push(Call::CoinLockout(locked));
    }

    fn push_solenoid(&mut self, index: u8, pulse: u8) {
        self.calls.push(Call::Fire(index, pulse));
    }
}

impl NvStorage for FakeBoard {
    type Error = Broken;

    fn read_byte(&mut self, address: NvAddress) -> Result<u8, Broken> {
        if self.broken_storage {
            return Err(Broken);
        }
        Ok(self.nv[address.as_u16() as usize])
    }

    fn write_byte(&mut self, address: NvAddress, value: u8) -> Result<(), Broken> {
        if self.broken_storage {
            return Err(Broken);
        }
        self.calls.push(Call::WriteByte(address.as_u16(), value));
        self.nv[address.as_u16() as usize] = value;
        Ok(())
    }

    fn read_u32(&mut self, address: NvAddress) -> Result<u32, Broken> {
        if self.broken_storage {
            return Err(Broken);
        }
        Ok(self.stored_u32(address))
    }

    fn write_u32(&mut self, address: NvAddress, value: u32) -> Result<(), Broken> {
        if self.broken_storage {
            return Err(Broken);
        }
        self.calls.push(Call::WriteU32(address.as_u16(), value));
        self.store_u32(address, value);
        Ok(())
    }
}

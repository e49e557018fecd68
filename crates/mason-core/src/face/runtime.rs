impl<CL, BT, GS, TM> Watchface<CL, BT, GS, TM>
where
    CL: ClockService,
    BT: ConnectivityService,
    GS: GestureService,
    TM: TimerService,
{
    pub fn new(clock: CL, connectivity: BT, gestures: GS, timers: TM, config: FaceConfig) -> Self {
        let mut config = config;
        config.outer_radius = config.outer_radius.max(1);
        config.outer_thickness = config.outer_thickness.clamp(0, config.outer_radius);
        config.inner_radius = config.inner_radius.clamp(1, config.outer_radius);
        config.dot_radius = config.dot_radius.max(2);

        let mut face = Self {
            clock,
            connectivity,
            gestures,
            timers,
            config,
            style: FaceStyle::default(),
            state: ClockState::default(),
            date_label: heapless::String::new(),
            marker_timer: None,
            pending_redraw: true,
        };

        match face.clock.current() {
            Ok(time) => face.apply_time(time),
            Err(_) => warn!("face: initial time read failed"),
        }

        match face.connectivity.peek() {
            Ok(connected) => face.state.bluetooth_connected = connected,
            Err(_) => warn!("face: initial link state read failed"),
        }

        face
    }

    /// Drains provider events and reports whether a redraw is due.
    ///
    /// Any number of state changes between two calls coalesce into a single
    /// `RenderRequested`.
    pub fn tick(&mut self) -> TickResult {
        self.drain_clock();
        self.drain_connectivity();
        self.drain_gestures();
        self.drain_timers();

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Current mirrored clock state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether the tapped-in hour markers are currently shown.
    pub fn markers_visible(&self) -> bool {
        self.marker_timer.is_some()
    }

    /// The composed date label, e.g. `"TUE 09"`.
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// Applies persisted settings, requesting a redraw on change.
    pub fn apply_settings(&mut self, settings: PersistedSettings) {
        if self.style.inverted != settings.inverted {
            self.style.inverted = settings.inverted;
            self.pending_redraw = true;
        }
    }

    /// Settings snapshot for persistence.
    pub fn settings(&self) -> PersistedSettings {
        PersistedSettings {
            inverted: self.style.inverted,
        }
    }

    /// Cancels the outstanding marker timer, if any, without firing it.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.marker_timer.take()
            && self.timers.cancel(handle).is_err()
        {
            warn!("face: marker timer cancel failed");
        }
    }

    fn drain_clock(&mut self) {
        loop {
            match self.clock.poll_tick() {
                Ok(Some(time)) => self.apply_time(time),
                Ok(None) => break,
                Err(_) => {
                    warn!("face: clock poll failed");
                    break;
                }
            }
        }
    }

    fn apply_time(&mut self, time: TimeOfDay) {
        self.state.hour = time.hour.min(23);
        self.state.minute = time.minute.min(59);

        self.date_label.clear();
        if write!(
            self.date_label,
            "{} {:02}",
            time.weekday_name, time.day_of_month
        )
        .is_err()
        {
            self.date_label.clear();
        }

        debug!(
            "face: time {:02}:{:02} ({})",
            self.state.hour, self.state.minute, self.date_label
        );
        self.pending_redraw = true;
    }

    fn drain_connectivity(&mut self) {
        loop {
            match self.connectivity.poll_change() {
                Ok(Some(connected)) => {
                    if connected != self.state.bluetooth_connected {
                        self.state.bluetooth_connected = connected;
                        debug!("face: link {}", if connected { "up" } else { "down" });
                        self.pending_redraw = true;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("face: connectivity poll failed");
                    break;
                }
            }
        }
    }

    fn drain_gestures(&mut self) {
        loop {
            match self.gestures.poll_event() {
                Ok(Some(GestureEvent::Tap)) => self.apply_tap(),
                Ok(None) => break,
                Err(_) => {
                    warn!("face: gesture poll failed");
                    break;
                }
            }
        }
    }

    fn apply_tap(&mut self) {
        if self.marker_timer.is_some() {
            debug!("face: tap while markers already shown");
            return;
        }

        match self.timers.schedule_once(self.config.marker_timeout_ms) {
            Ok(handle) => {
                self.marker_timer = Some(handle);
                self.pending_redraw = true;
            }
            Err(_) => warn!("face: marker timer arm failed"),
        }
    }

    fn drain_timers(&mut self) {
        loop {
            match self.timers.poll_expired() {
                Ok(Some(handle)) => {
                    if self.marker_timer == Some(handle) {
                        self.marker_timer = None;
                        self.pending_redraw = true;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("face: timer poll failed");
                    break;
                }
            }
        }
    }
}

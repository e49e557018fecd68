impl<CL, BT, GS, TM> Watchface<CL, BT, GS, TM>
where
    CL: ClockService,
    BT: ConnectivityService,
    GS: GestureService,
    TM: TimerService,
{
    /// Paints the whole face from the latest state.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let ink = self.style.ink();
        let paper = self.style.paper();
        let center = self.config.center;

        target.clear(paper)?;

        self.draw_hand(
            target,
            self.config.inner_radius,
            self.config.inner_radius,
            minute_hand_angle(self.state.minute),
            ink,
        )?;

        let hours_angle = hour_hand_angle(self.state.hour, self.state.minute);
        self.draw_hand(
            target,
            self.config.outer_radius,
            self.config.outer_thickness,
            hours_angle,
            ink,
        )?;

        // Round off the hour ring's cap at 12 o'clock.
        target.draw_iter([
            Pixel(
                Point::new(center.x - 1, center.y - self.config.outer_radius + 2),
                ink,
            ),
            Pixel(
                Point::new(center.x - 1, center.y - self.config.outer_radius + 3),
                ink,
            ),
        ])?;

        if self.markers_visible() {
            self.draw_hour_markers(target, ink, paper)?;
        }

        self.draw_hour_pointer(target, hours_angle, ink, paper)?;
        self.draw_link_glyph(target, ink, paper)?;

        Text::with_alignment(
            &self.date_label,
            self.config.date_anchor,
            MonoTextStyle::new(&FONT_10X20, ink),
            Alignment::Center,
        )
        .draw(target)?;

        Ok(())
    }

    /// One hand as one or two arc sectors, sweeping clockwise from 12
    /// o'clock.
    ///
    /// Sweeps past 90° split at the 0°/360° seam; the rasterizer's boundary
    /// tests do not span it.
    fn draw_hand<D>(
        &self,
        target: &mut D,
        radius: i32,
        thickness: i32,
        angle: i32,
        ink: BinaryColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let center = self.config.center;

        if angle <= 90 {
            ArcSector::new(center, radius, thickness, 270, 270 + angle).draw(ink, target)
        } else {
            ArcSector::new(center, radius, thickness, 270, 360).draw(ink, target)?;
            ArcSector::new(center, radius, thickness, 0, angle - 90).draw(ink, target)
        }
    }

    fn draw_hour_markers<D>(
        &self,
        target: &mut D,
        ink: BinaryColor,
        paper: BinaryColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let orbit = self.config.outer_radius - self.config.outer_thickness / 2 - 1;
        for index in 0..12 {
            let dot = self.dial_point(index * 30, orbit);
            fill_circle(target, dot, self.config.dot_radius - 2, ink)?;
        }

        // Clip the dots' outer spill back to the ring.
        ArcSector::new(self.config.center, self.config.outer_radius + 5, 5, 0, 360)
            .draw(paper, target)
    }

    fn draw_hour_pointer<D>(
        &self,
        target: &mut D,
        angle: i32,
        ink: BinaryColor,
        paper: BinaryColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let orbit = self.config.outer_radius - self.config.outer_thickness / 2;
        let dot = self.dial_point(angle, orbit);

        fill_circle(target, dot, self.config.dot_radius, ink)?;
        if self.state.hour >= 12 {
            // Punched center marks the second turn of the dial.
            fill_circle(target, dot, self.config.dot_radius - 2, paper)?;
        }

        Ok(())
    }

    fn draw_link_glyph<D>(
        &self,
        target: &mut D,
        ink: BinaryColor,
        paper: BinaryColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let center = self.config.center;
        let radius = self.config.dot_radius;

        if self.state.bluetooth_connected {
            fill_circle(target, center, radius + 3, paper)?;
            fill_circle(target, center, radius, ink)?;
            fill_circle(target, center, radius - 2, paper)
        } else {
            fill_square(target, center, radius + 4, paper)?;
            fill_square(target, center, radius, ink)?;
            fill_square(target, center, radius - 2, paper)
        }
    }

    /// Panel point at `angle` clockwise degrees from 12 o'clock, `orbit`
    /// pixels out from the center.
    fn dial_point(&self, angle: i32, orbit: i32) -> Point {
        let radians = angle as f32 * PI / 180.0;

        Point::new(
            self.config.center.x + (sinf(radians) * orbit as f32) as i32,
            self.config.center.y - (cosf(radians) * orbit as f32) as i32,
        )
    }
}

fn fill_circle<D>(
    target: &mut D,
    center: Point,
    radius: i32,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if radius < 0 {
        return Ok(());
    }

    Circle::with_center(center, (2 * radius + 1) as u32)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

fn fill_square<D>(
    target: &mut D,
    center: Point,
    half_side: i32,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if half_side <= 0 {
        return Ok(());
    }

    Rectangle::new(
        Point::new(center.x - half_side, center.y - half_side),
        Size::new(2 * half_side as u32, 2 * half_side as u32),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(target)
}

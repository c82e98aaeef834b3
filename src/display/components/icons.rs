/*
 *  display/components/icons.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather icons drawn from primitives, scaled to any square
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Polyline, PrimitiveStyle, Rectangle};

use crate::condition::WeatherIcon;

/// Draw `icon` inside the `size` x `size` square at `origin`.
pub fn draw_icon<D, C>(
    target: &mut D,
    icon: WeatherIcon,
    origin: Point,
    size: u32,
    color: C,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let s = size as i32;
    let fill = PrimitiveStyle::with_fill(color);
    let stroke = PrimitiveStyle::with_stroke(color, 1);

    match icon {
        WeatherIcon::Clear => {
            let d = size * 2 / 3;
            Circle::new(origin + Point::new((s - d as i32) / 2, (s - d as i32) / 2), d)
                .into_styled(fill)
                .draw(target)?;
        }
        WeatherIcon::LightClouds => {
            // sun peeking over the cloud
            let d = size / 2;
            Circle::new(origin + Point::new(s - d as i32, 0), d)
                .into_styled(stroke)
                .draw(target)?;
            draw_cloud(target, origin, size, fill)?;
        }
        WeatherIcon::Cloudy => {
            draw_cloud(target, origin, size, fill)?;
        }
        WeatherIcon::LightRain => {
            draw_cloud(target, origin, size, fill)?;
            draw_drops(target, origin, size, 2, stroke)?;
        }
        WeatherIcon::Rain => {
            draw_cloud(target, origin, size, fill)?;
            draw_drops(target, origin, size, 3, stroke)?;
        }
        WeatherIcon::Snow => {
            draw_cloud(target, origin, size, fill)?;
            let y = origin.y + s * 5 / 6;
            for i in 1..=3 {
                let x = origin.x + s * i / 4;
                Rectangle::new(Point::new(x - 1, y - 1), Size::new(2, 2))
                    .into_styled(fill)
                    .draw(target)?;
            }
        }
        WeatherIcon::Fog => {
            for i in 1..=3 {
                let y = origin.y + s * i / 4;
                let inset = if i == 2 { 0 } else { s / 8 };
                Line::new(Point::new(origin.x + inset, y), Point::new(origin.x + s - 1 - inset, y))
                    .into_styled(stroke)
                    .draw(target)?;
            }
        }
        WeatherIcon::Storm => {
            draw_cloud(target, origin, size, fill)?;
            let bolt = [
                origin + Point::new(s / 2, s * 3 / 5),
                origin + Point::new(s * 2 / 5, s * 4 / 5),
                origin + Point::new(s * 3 / 5, s * 4 / 5),
                origin + Point::new(s / 2, s - 1),
            ];
            Polyline::new(&bolt).into_styled(stroke).draw(target)?;
        }
    }
    Ok(())
}

/// Cloud across the upper part of the square
fn draw_cloud<D, C>(target: &mut D, origin: Point, size: u32, style: PrimitiveStyle<C>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let s = size as i32;
    let small = (size * 2 / 5).max(2);
    let big = (size / 2).max(2);
    Circle::new(origin + Point::new(s / 8, s / 4), small)
        .into_styled(style)
        .draw(target)?;
    Circle::new(origin + Point::new(s / 3, s / 8), big)
        .into_styled(style)
        .draw(target)?;
    Rectangle::new(
        origin + Point::new(s / 8 + small as i32 / 2, s / 4 + small as i32 / 2),
        Size::new((size * 3 / 5).max(1), (size / 5).max(1)),
    )
    .into_styled(style)
    .draw(target)?;
    Ok(())
}

fn draw_drops<D, C>(
    target: &mut D,
    origin: Point,
    size: u32,
    count: i32,
    style: PrimitiveStyle<C>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let s = size as i32;
    for i in 1..=count {
        let x = origin.x + s * i / (count + 1);
        Line::new(Point::new(x, origin.y + s * 2 / 3), Point::new(x - 2, origin.y + s - 1))
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

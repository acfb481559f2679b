// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Statistics collected by the manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerStatistics {
    /// Requests answered with a tour.
    pub paths_assigned: u64,
    /// Requests answered with a terminate notice.
    pub terminations_sent: u64,
    /// Stack entries expanded by the manager.
    pub splits: u64,
    /// Children produced by those splits.
    pub children_generated: u64,
    /// Improved tours reported by workers.
    pub reports_received: u64,
    /// Reports that lowered the Global Best.
    pub improvements_accepted: u64,
    /// Messages that broke the protocol and were ignored.
    pub protocol_violations: u64,
}

impl ManagerStatistics {
    #[inline]
    pub fn on_path_assigned(&mut self) {
        self.paths_assigned = self.paths_assigned.saturating_add(1);
    }

    #[inline]
    pub fn on_termination_sent(&mut self) {
        self.terminations_sent = self.terminations_sent.saturating_add(1);
    }

    #[inline]
    pub fn on_split(&mut self, children: usize) {
        self.splits = self.splits.saturating_add(1);
        self.children_generated = self.children_generated.saturating_add(children as u64);
    }

    #[inline]
    pub fn on_report(&mut self, accepted: bool) {
        self.reports_received = self.reports_received.saturating_add(1);
        if accepted {
            self.improvements_accepted = self.improvements_accepted.saturating_add(1);
        }
    }

    #[inline]
    pub fn on_protocol_violation(&mut self) {
        self.protocol_violations = self.protocol_violations.saturating_add(1);
    }

    /// Total requests the manager answered.
    #[inline]
    pub fn requests_served(&self) -> u64 {
        self.paths_assigned.saturating_add(self.terminations_sent)
    }
}

impl std::fmt::Display for ManagerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Drover Manager Statistics:")?;
        writeln!(f, "  Paths assigned:        {}", self.paths_assigned)?;
        writeln!(f, "  Terminations sent:     {}", self.terminations_sent)?;
        writeln!(f, "  Splits:                {}", self.splits)?;
        writeln!(f, "  Children generated:    {}", self.children_generated)?;
        writeln!(f, "  Reports received:      {}", self.reports_received)?;
        writeln!(f, "  Improvements accepted: {}", self.improvements_accepted)?;
        writeln!(f, "  Protocol violations:   {}", self.protocol_violations)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = ManagerStatistics::default();
        s.on_path_assigned();
        s.on_path_assigned();
        s.on_termination_sent();
        s.on_split(3);
        s.on_split(0);
        s.on_report(true);
        s.on_report(false);
        s.on_protocol_violation();
        assert_eq!(s.requests_served(), 3);
        assert_eq!(s.splits, 2);
        assert_eq!(s.children_generated, 3);
        assert_eq!(s.reports_received, 2);
        assert_eq!(s.improvements_accepted, 1);
        assert_eq!(s.protocol_violations, 1);
        assert!(s.to_string().contains("Splits:                2"));
    }
}
